//! Sequential coercion pipeline.
//!
//! Normalization functions compose as ordered stages over a single text
//! value: each stage accepts the previous stage's output and either produces
//! the next value or aborts the whole run with a typed failure. The two core
//! normalizers are total and never abort; fallible stages (validators,
//! converters) plug into the same chain.
//!
//! What happens on abort is chosen up front with [`Pipeline::or`]: map the
//! causing error into another error, replace it with a pre-built error, or
//! swallow it and return a fallback value as the pipeline's result.

use std::fmt;

type Step = Box<dyn Fn(String) -> Result<String, PipelineError> + Send + Sync>;

/// Failure raised by a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    message: String,
}

impl PipelineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipeline stage failed: {}", self.message)
    }
}

impl std::error::Error for PipelineError {}

/// What a pipeline does with the first stage failure.
pub enum Fallback {
    /// Invoke the function with the causing error and return its result as
    /// the pipeline's error.
    With(Box<dyn Fn(PipelineError) -> PipelineError + Send + Sync>),
    /// Return this pre-built error, discarding the causing one.
    Error(PipelineError),
    /// Swallow the error and return this value as the pipeline's result.
    Value(String),
}

impl Fallback {
    pub fn with(f: impl Fn(PipelineError) -> PipelineError + Send + Sync + 'static) -> Self {
        Fallback::With(Box::new(f))
    }

    pub fn error(err: PipelineError) -> Self {
        Fallback::Error(err)
    }

    pub fn value(value: impl Into<String>) -> Self {
        Fallback::Value(value.into())
    }
}

/// An ordered chain of text transformations with a single failure policy.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
    fallback: Option<Fallback>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fallible stage.
    pub fn to(
        mut self,
        step: impl Fn(String) -> Result<String, PipelineError> + Send + Sync + 'static,
    ) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Appends a total stage that cannot fail, such as the core normalizers.
    pub fn map(self, step: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.to(move |value| Ok(step(&value)))
    }

    /// Sets the failure policy. The last call wins.
    pub fn or(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Runs every stage in order. The first stage failure aborts the run
    /// and is resolved through the configured fallback; with no fallback
    /// the causing error is returned as-is.
    pub fn run(&self, input: &str) -> Result<String, PipelineError> {
        let mut value = input.to_string();
        for step in &self.steps {
            match step(value) {
                Ok(next) => value = next,
                Err(err) => {
                    return match &self.fallback {
                        Some(Fallback::With(f)) => Err(f(err)),
                        Some(Fallback::Error(prebuilt)) => Err(prebuilt.clone()),
                        Some(Fallback::Value(fallback)) => Ok(fallback.clone()),
                        None => Err(err),
                    };
                }
            }
        }
        Ok(value)
    }
}
