use std::any::Any;
use std::cmp::Ordering;

use crate::contract::{compare_as, Contract, PayloadKind};
use crate::forest::Forest;

/// Signed integer payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntKind;

impl Contract for IntKind {
    fn name(&self) -> &'static str {
        "int"
    }

    fn size(&self) -> usize {
        std::mem::size_of::<i64>()
    }

    fn compare(&self, _forest: &Forest, a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
        compare_as::<i64>(a, b, |a, b| Some(a.cmp(b)))
    }

    fn stringify(&self, payload: &dyn Any) -> Option<String> {
        payload.downcast_ref::<i64>().map(i64::to_string)
    }
}

impl PayloadKind for IntKind {
    type Init = i64;
    type Value = i64;

    fn construct(&self, _forest: &Forest, init: &i64) -> Option<i64> {
        Some(*init)
    }
}
