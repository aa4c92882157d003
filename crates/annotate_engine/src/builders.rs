//! Ready-made annotation kinds.
//!
//! Builders only construct [`Annotation`]s; applying them goes through
//! [`Registry::apply`](crate::Registry::apply) like any other annotation, so
//! new kinds never need engine changes.

use std::fmt;
use std::sync::Arc;

use annotate_foundation::{Result, Value};

use crate::annotation::Annotation;

/// Key used by [`description`].
pub const DESCRIPTION: &str = "description";

/// Human-readable description; repeatable, not inherited, any target.
#[must_use]
pub fn description(text: impl Into<Value>) -> Annotation {
    Annotation::new(DESCRIPTION, text).with_repeatable(true)
}

/// Value-less annotation whose presence is the information.
#[must_use]
pub fn marker(key: impl Into<String>) -> Annotation {
    Annotation::new(key, Value::Nil)
}

type ValueHook = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// Builds annotations whose value is computed from arguments.
///
/// The template fixes key, modifiers, and targets; the hook turns the
/// arguments given to [`build`](Self::build) into the value.
#[derive(Clone)]
pub struct AnnotationFactory {
    template: Annotation,
    hook: Arc<ValueHook>,
}

impl AnnotationFactory {
    /// Creates a factory from a template and a value hook.
    pub fn new(
        template: Annotation,
        hook: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            template,
            hook: Arc::new(hook),
        }
    }

    /// Factory whose value is the single argument, or a list of all of them.
    #[must_use]
    pub fn identity(template: Annotation) -> Self {
        Self::new(template, |args| {
            Ok(match args {
                [] => Value::Nil,
                [single] => single.clone(),
                many => Value::list(many.iter().cloned()),
            })
        })
    }

    /// The key of every annotation this factory builds.
    #[must_use]
    pub fn key(&self) -> &str {
        self.template.key()
    }

    /// Runs the hook and returns the resulting annotation.
    pub fn build(&self, args: &[Value]) -> Result<Annotation> {
        let value = (self.hook)(args)?;
        Ok(self.template.clone().with_value(value))
    }
}

impl fmt::Debug for AnnotationFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationFactory")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
