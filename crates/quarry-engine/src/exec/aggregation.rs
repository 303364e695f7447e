//! Hash aggregation executor.

use std::sync::Arc;

use indexmap::IndexMap;
use quarry_core::{Expr, Row, Schema, Value};

use crate::aggregate::{Aggregate, AggregateState};
use crate::error::{EngineError, Result};
use crate::plan::AggregationPlan;

type GroupKey = Vec<Value>;
type GroupStates = Vec<AggregateState>;

/// Partitions child rows by group key and folds aggregate states per group.
///
/// The child is drained entirely during `init`. Groups are kept in an
/// insertion-ordered map, so iteration yields them in first-occurrence order;
/// NULL key components group together through the value system's structural
/// equality. Emitted rows carry aggregate results first, then the group key,
/// matching the plan's output schema.
pub struct AggregationExecutor {
    group_bys: Vec<Expr>,
    aggregates: Vec<Aggregate>,
    output_schema: Arc<Schema>,
    child: Box<super::Executor>,
    results: Option<indexmap::map::IntoIter<GroupKey, GroupStates>>,
}

impl AggregationExecutor {
    pub(crate) fn new(plan: &AggregationPlan, child: super::Executor) -> Self {
        Self {
            group_bys: plan.group_bys.clone(),
            aggregates: plan.aggregates.clone(),
            output_schema: Arc::clone(&plan.output_schema),
            child: Box::new(child),
            results: None,
        }
    }

    pub(crate) fn init(&mut self) -> Result<()> {
        self.child.init()?;

        let mut groups: IndexMap<GroupKey, GroupStates> = IndexMap::new();
        while let Some(row) = self.child.next()? {
            let key = self
                .group_bys
                .iter()
                .map(|expr| expr.evaluate(&row))
                .collect::<quarry_core::error::Result<GroupKey>>()?;

            let states = groups
                .entry(key)
                .or_insert_with(|| self.aggregates.iter().map(|a| AggregateState::new(a.kind)).collect());

            for (aggregate, state) in self.aggregates.iter().zip(states.iter_mut()) {
                state.update(&aggregate.expr.evaluate(&row)?)?;
            }
        }

        self.results = Some(groups.into_iter());
        Ok(())
    }

    pub(crate) fn next(&mut self) -> Result<Option<Row>> {
        let results = self.results.as_mut().ok_or(EngineError::NotInitialized)?;
        let Some((key, states)) = results.next() else {
            return Ok(None);
        };

        let mut values = Vec::with_capacity(states.len() + key.len());
        for state in &states {
            values.push(state.finalize()?);
        }
        values.extend(key);

        Ok(Some(Row::new(Arc::clone(&self.output_schema), values)?))
    }
}
