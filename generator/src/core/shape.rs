//! Per-arity union shape: every name and expression the type template needs.
//!
//! The template only loops and substitutes; all arity-dependent decisions
//! (narrowing, re-indexing, result retyping) are made here so they can be
//! tested without rendering.

use serde::Serialize;

use crate::core::slots::remainder_index;
use crate::core::types::{ArityConfig, SlotDescriptor, VariantKind};

/// Multiplier applied to the payload hash before the discriminant is mixed in.
pub const HASH_MULTIPLIER: i32 = 397;

/// Name of the generic parameter a `Map` operation introduces.
pub const MAP_RESULT_PARAM: &str = "TResult";

/// Template context for one generated union type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionShape {
    pub arity: usize,
    pub is_value: bool,
    /// `OneOf` or `OneOfBase`.
    pub type_name: &'static str,
    /// `T0, T1, ..`
    pub generic_args: String,
    /// Fully applied type of this union, e.g. `OneOfBase<T0, T1>`.
    pub self_type: String,
    /// Fully applied value variant of the same arity.
    pub value_type: String,
    pub slots: Vec<SlotShape>,
    pub maps: Vec<MapShape>,
    pub picks: Vec<PickShape>,
    pub hash_multiplier: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotShape {
    pub index: usize,
    pub name: String,
}

/// One `switch` arm: `{index} => {expr},`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arm {
    pub index: usize,
    pub expr: String,
}

/// `Map{name}<TResult>`: rewrites slot `index`, reboxes every other slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapShape {
    pub index: usize,
    pub name: String,
    pub result_type: String,
    pub arms: Vec<Arm>,
}

/// `TryPick{name}`: extracts slot `index` and narrows the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickShape {
    pub index: usize,
    pub name: String,
    pub remainder_type: String,
    pub arms: Vec<Arm>,
}

impl UnionShape {
    pub fn build(config: ArityConfig) -> Self {
        let slots = SlotDescriptor::for_arity(config.arity());
        let generic_args = slots.joined();
        let value_type = applied(VariantKind::Value.type_name(), &slots);
        let self_type = applied(config.kind().type_name(), &slots);

        let maps = if config.kind().is_value() {
            (0..slots.arity()).map(|k| map_shape(&slots, k)).collect()
        } else {
            Vec::new()
        };
        let picks = if slots.arity() > 1 {
            (0..slots.arity()).map(|k| pick_shape(&slots, k)).collect()
        } else {
            Vec::new()
        };

        Self {
            arity: slots.arity(),
            is_value: config.kind().is_value(),
            type_name: config.kind().type_name(),
            generic_args,
            self_type,
            value_type,
            slots: slots
                .names()
                .iter()
                .enumerate()
                .map(|(index, name)| SlotShape {
                    index,
                    name: name.clone(),
                })
                .collect(),
            maps,
            picks,
            hash_multiplier: HASH_MULTIPLIER,
        }
    }
}

fn applied(type_name: &str, slots: &SlotDescriptor) -> String {
    format!("{type_name}<{}>", slots.joined())
}

/// Factory call placing `expr` at `position` of `union_type`.
fn boxed(union_type: &str, position: usize, expr: &str) -> String {
    format!("{union_type}.FromT{position}({expr})")
}

fn map_shape(slots: &SlotDescriptor, mapped: usize) -> MapShape {
    let name = slots.name(mapped).to_string();
    let result_type = applied(
        VariantKind::Value.type_name(),
        &slots.replaced(mapped, MAP_RESULT_PARAM),
    );
    let arms = slots
        .names()
        .iter()
        .enumerate()
        .map(|(k, slot)| {
            let payload = if k == mapped {
                format!("mapFunc(As{slot})")
            } else {
                format!("As{slot}")
            };
            Arm {
                index: k,
                expr: boxed(&result_type, k, &payload),
            }
        })
        .collect();
    MapShape {
        index: mapped,
        name,
        result_type,
        arms,
    }
}

fn pick_shape(slots: &SlotDescriptor, picked: usize) -> PickShape {
    let name = slots.name(picked).to_string();
    let rest = slots.without(picked);
    let remainder_type = if rest.arity() == 1 {
        rest.name(0).to_string()
    } else {
        applied(VariantKind::Value.type_name(), &rest)
    };
    let arms = slots
        .names()
        .iter()
        .enumerate()
        .map(|(k, slot)| {
            let expr = match remainder_index(k, picked) {
                None => "default".to_string(),
                Some(_) if rest.arity() == 1 => format!("As{slot}"),
                Some(position) => boxed(&remainder_type, position, &format!("As{slot}")),
            };
            Arm { index: k, expr }
        })
        .collect();
    PickShape {
        index: picked,
        name,
        remainder_type,
        arms,
    }
}
