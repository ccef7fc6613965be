use std::any::Any;
use std::cmp::Ordering;

use crate::contract::{compare_as, Contract, PayloadKind};
use crate::forest::Forest;

/// Owned, non-empty text.
///
/// Ordering is shortlex: shorter strings sort first, equal lengths compare
/// bytewise. Two payloads are equal exactly when length and bytes match.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextKind;

impl Contract for TextKind {
    fn name(&self) -> &'static str {
        "string"
    }

    fn size(&self) -> usize {
        std::mem::size_of::<String>()
    }

    fn compare(&self, _forest: &Forest, a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
        compare_as::<String>(a, b, |a, b| {
            Some(
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.as_bytes().cmp(b.as_bytes())),
            )
        })
    }

    fn stringify(&self, payload: &dyn Any) -> Option<String> {
        payload.downcast_ref::<String>().cloned()
    }

    fn as_text<'a>(&self, payload: &'a dyn Any) -> Option<&'a str> {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}

impl PayloadKind for TextKind {
    type Init = str;
    type Value = String;

    fn construct(&self, _forest: &Forest, init: &str) -> Option<String> {
        if init.is_empty() {
            None
        } else {
            Some(init.to_owned())
        }
    }
}
