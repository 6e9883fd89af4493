//! Compiles a query tree into a pipeline of filter steps.
//!
//! Compilation is a single depth-first walk over the tree. Steps are
//! collected into an accumulator local to the call, so independent queries
//! can be compiled concurrently. The resulting [`Pipeline`] only holds
//! immutable step descriptors and can be run any number of times, from any
//! number of threads.

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Filter, IntegerLit, Query, Root, Selector, Span, StringLit},
    value::{Value, ValueKind},
};

/// Errors that can occur while running a pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The filter cannot be applied to a value of this shape.
    #[error("Interpreter error: cannot query [ {kind} ] ( {value} ) with ( {filter} )")]
    TypeMismatch {
        value: Value,
        kind: ValueKind,
        filter: String,
    },
}

impl EvalError {
    fn mismatch(value: Value, filter: &str) -> Self {
        EvalError::TypeMismatch {
            kind: value.kind(),
            value,
            filter: filter.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Identity,
    Key(String),
    Index(usize),
    Span { left: Option<usize>, right: Option<usize> },
    Iterator,
}

/// One compiled filter together with the text used to report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    name: String,
    op: Op,
}

impl Step {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the step to every value of `data`, in order.
    pub fn apply(&self, data: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        match &self.op {
            Op::Identity => Ok(data),
            Op::Key(key) => self.apply_key(key, data),
            Op::Index(index) => self.apply_index(*index, data),
            Op::Span { left, right } => self.apply_span(*left, *right, data),
            Op::Iterator => self.apply_iterator(data),
        }
    }

    fn apply_key(&self, key: &str, data: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        let mut result = Vec::with_capacity(data.len());
        for d in data {
            match d {
                Value::Table(mut table) => {
                    // Missing keys drop out silently
                    if let Some(v) = table.remove(key) {
                        result.push(v);
                    }
                }
                other => return Err(EvalError::mismatch(other, &self.name)),
            }
        }
        Ok(result)
    }

    fn apply_index(&self, index: usize, data: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        let mut result = Vec::with_capacity(data.len());
        for d in data {
            match d {
                Value::Array(array) => {
                    if let Some(v) = array.into_iter().nth(index) {
                        result.push(v);
                    }
                }
                other => return Err(EvalError::mismatch(other, &self.name)),
            }
        }
        Ok(result)
    }

    fn apply_span(
        &self,
        left: Option<usize>,
        right: Option<usize>,
        data: Vec<Value>,
    ) -> Result<Vec<Value>, EvalError> {
        let mut result = Vec::with_capacity(data.len());
        for d in data {
            match d {
                Value::Array(array) => {
                    let len = array.len();
                    let l = left.unwrap_or(0);
                    let r = right.unwrap_or(len).min(len);
                    if l > r || l >= len {
                        continue;
                    }
                    let slice = array.into_iter().skip(l).take(r - l).collect();
                    result.push(Value::Array(slice));
                }
                other => return Err(EvalError::mismatch(other, &self.name)),
            }
        }
        Ok(result)
    }

    fn apply_iterator(&self, data: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        let mut result = Vec::with_capacity(data.len());
        for d in data {
            match d {
                Value::Table(table) => result.extend(table.into_values()),
                Value::Array(array) => result.extend(array),
                other => return Err(EvalError::mismatch(other, &self.name)),
            }
        }
        Ok(result)
    }
}

/// An ordered, immutable sequence of compiled filter steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feeds `data` through every step, left to right.
    ///
    /// The first failing step aborts the run and its partial output is
    /// discarded. An empty pipeline returns its input unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tq_lang::ast::{Filter, IntegerLit, Query, Root, Selector};
    /// use tq_lang::{Value, interpreter::compile};
    ///
    /// let root = Root {
    ///     query: Query {
    ///         filters: vec![Filter::Selector(Selector::Integer(IntegerLit::new("1")))],
    ///     },
    /// };
    /// let pipeline = compile(&root);
    ///
    /// let doc = Value::Array(vec![Value::Integer(10), Value::Integer(20)]);
    /// assert_eq!(pipeline.run(vec![doc]).unwrap(), vec![Value::Integer(20)]);
    /// ```
    pub fn run(&self, mut data: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        debug!(steps = self.steps.len(), inputs = data.len(), "running pipeline");
        for step in &self.steps {
            data = step.apply(data)?;
            trace!(step = %step.name, outputs = data.len(), "applied step");
        }
        Ok(data)
    }

    /// Wraps the pipeline into a single evaluation function.
    pub fn into_fn(self) -> impl Fn(Vec<Value>) -> Result<Vec<Value>, EvalError> + Send + Sync {
        move |data: Vec<Value>| self.run(data)
    }
}

/// Compiles a query tree into a [`Pipeline`].
pub fn compile(root: &Root) -> Pipeline {
    let mut steps = Vec::new();
    visit_query(&root.query, &mut steps);
    debug!(steps = steps.len(), "compiled query");
    Pipeline { steps }
}

fn visit_query(query: &Query, steps: &mut Vec<Step>) {
    for filter in &query.filters {
        visit_filter(filter, steps);
    }
}

fn visit_filter(filter: &Filter, steps: &mut Vec<Step>) {
    match filter {
        Filter::Identity => steps.push(Step {
            name: filter.to_string(),
            op: Op::Identity,
        }),
        Filter::Selector(selector) => visit_selector(selector, steps),
    }
}

fn visit_selector(selector: &Selector, steps: &mut Vec<Step>) {
    let step = match selector {
        Selector::Iterator => Step {
            name: selector.to_string(),
            op: Op::Iterator,
        },
        Selector::String(s) => visit_string(s),
        Selector::Integer(i) => visit_integer(i),
        Selector::Span(s) => visit_span(s),
    };
    steps.push(step);
}

fn visit_string(s: &StringLit) -> Step {
    Step {
        name: s.to_string(),
        op: Op::Key(s.trim().to_string()),
    }
}

fn visit_integer(i: &IntegerLit) -> Step {
    Step {
        name: i.to_string(),
        op: Op::Index(i.saturating_value()),
    }
}

fn visit_span(s: &Span) -> Step {
    Step {
        name: s.to_string(),
        op: Op::Span {
            left: s.left.as_ref().map(IntegerLit::saturating_value),
            right: s.right.as_ref().map(IntegerLit::saturating_value),
        },
    }
}
