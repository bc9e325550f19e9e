//! Arity template renderer: `(arity, variant kind) -> C# source`.

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::debug;

use crate::core::shape::UnionShape;
use crate::core::types::ArityConfig;

const UNION_TEMPLATE: &str = include_str!("templates/oneof.cs.j2");
const UNION_TEMPLATE_NAME: &str = "oneof.cs";

/// Template engine wrapper around minijinja holding the union type template.
pub struct TypeRenderer {
    env: Environment<'static>,
}

impl TypeRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(UNION_TEMPLATE_NAME, UNION_TEMPLATE)
            .context("parse union type template")?;
        Ok(Self { env })
    }

    /// Render the complete source file for one arity and variant kind.
    pub fn render(&self, config: ArityConfig) -> Result<String> {
        let shape = UnionShape::build(config);
        let template = self.env.get_template(UNION_TEMPLATE_NAME)?;
        let rendered = template
            .render(&shape)
            .with_context(|| format!("render {} arity {}", config.kind(), config.arity()))?;
        debug!(
            arity = config.arity(),
            kind = %config.kind(),
            bytes = rendered.len(),
            "rendered union type"
        );
        Ok(rendered)
    }
}

/// One-shot convenience over [`TypeRenderer`].
pub fn render_type(config: ArityConfig) -> Result<String> {
    TypeRenderer::new()?.render(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::VariantKind;

    fn render(arity: usize, kind: VariantKind) -> String {
        render_type(ArityConfig::new(arity, kind).expect("config")).expect("render")
    }

    fn count(haystack: &str, pattern: &str) -> usize {
        regex::Regex::new(pattern)
            .expect("regex")
            .find_iter(haystack)
            .count()
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = TypeRenderer::new().expect("renderer");
        for arity in [1, 2, 9, 10, 32] {
            for kind in VariantKind::ALL {
                let config = ArityConfig::new(arity, kind).expect("config");
                let first = renderer.render(config).expect("render");
                let second = renderer.render(config).expect("render");
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn every_slot_gets_accessors_in_declaration_order() {
        for arity in [1, 3, 8, 17, 32] {
            for kind in VariantKind::ALL {
                let src = render(arity, kind);
                assert_eq!(count(&src, r"public bool IsT\d+ =>"), arity);
                assert_eq!(count(&src, r"public T\d+ AsT\d+ =>"), arity);
                assert_eq!(count(&src, r"readonly T\d+ _value\d+;"), arity);
                for j in 0..arity {
                    assert!(src.contains(&format!("public bool IsT{j} => _index == {j};")));
                    assert!(src.contains(&format!(
                        "throw new InvalidOperationException($\"Cannot return as T{j} as result is T{{_index}}\");"
                    )));
                }
                let switch_params = (0..arity)
                    .map(|j| format!("Action<T{j}> f{j}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                assert!(src.contains(&format!("public void Switch({switch_params})")));
                let match_params = (0..arity)
                    .map(|j| format!("Func<T{j}, TResult> f{j}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                assert!(src.contains(&format!("public TResult Match<TResult>({match_params})")));
            }
        }
    }

    fn value_accessor_block(src: &str) -> &str {
        let start = src.find("public object Value =>").expect("value accessor");
        let len = src[start..].find("};").expect("value accessor end");
        &src[start..start + len]
    }

    #[test]
    fn value_accessor_and_index_cover_every_slot() {
        for arity in [1, 2, 9, 32] {
            for kind in VariantKind::ALL {
                let src = render(arity, kind);
                let block = value_accessor_block(&src);
                assert_eq!(count(block, r"\d+ => _value\d+,"), arity);
                for j in 0..arity {
                    assert!(block.contains(&format!("{j} => _value{j},")));
                }
                assert!(block.contains("_ => throw new InvalidOperationException()"));
                assert!(src.contains("public int Index => _index;"));
            }
        }
    }

    #[test]
    fn implicit_conversions_carry_slot_discriminant() {
        for arity in [1, 3, 10] {
            let src = render(arity, VariantKind::Value);
            let self_type = format!(
                "OneOf<{}>",
                (0..arity)
                    .map(|j| format!("T{j}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            assert_eq!(count(&src, "public static implicit operator"), arity);
            for j in 0..arity {
                assert!(src.contains(&format!(
                    "public static implicit operator {self_type}(T{j} t) => new {self_type}({j}, value{j}: t);"
                )));
            }
        }
        let src = render(3, VariantKind::Value);
        assert!(src.contains(
            "public static implicit operator OneOf<T0, T1, T2>(T1 t) => new OneOf<T0, T1, T2>(1, value1: t);"
        ));
    }

    #[test]
    fn value_variant_has_conversions_factories_and_maps() {
        let src = render(3, VariantKind::Value);
        assert!(src.contains("public readonly struct OneOf<T0, T1, T2> : IOneOf"));
        assert!(src.contains(
            "OneOf(int index, T0 value0 = default, T1 value1 = default, T2 value2 = default)"
        ));
        assert_eq!(count(&src, "public static implicit operator"), 3);
        assert!(src.contains(
            "public static OneOf<T0, T1, T2> FromT1(T1 input) => new OneOf<T0, T1, T2>(1, value1: input);"
        ));
        assert_eq!(count(&src, r"public OneOf<[^>]*> MapT\d+<TResult>"), 3);
        assert!(src.contains(
            "public OneOf<T0, TResult, T2> MapT1<TResult>(Func<T1, TResult> mapFunc)"
        ));
        assert!(src.contains("1 => OneOf<T0, TResult, T2>.FromT1(mapFunc(AsT1)),"));
        assert!(src.contains("throw new ArgumentNullException(nameof(mapFunc));"));
        assert!(!src.contains("ReferenceEquals(this, obj)"));
    }

    #[test]
    fn base_variant_copies_from_value_variant() {
        let src = render(2, VariantKind::Base);
        assert!(src.contains("public class OneOfBase<T0, T1> : IOneOf"));
        assert!(src.contains("protected OneOfBase(OneOf<T0, T1> input)"));
        assert!(src.contains("case 1: _value1 = input.AsT1; break;"));
        assert!(src.contains("default: throw new InvalidOperationException();"));
        assert!(src.contains("ReferenceEquals(this, obj)"));
        assert!(src.contains("return obj is OneOfBase<T0, T1> o && Equals(o);"));
        assert!(!src.contains("implicit operator"));
        assert!(!src.contains("MapT0"));
        assert!(!src.contains("FromT0(T0 input)"));
    }

    #[test]
    fn try_pick_only_rendered_above_arity_one() {
        assert!(!render(1, VariantKind::Value).contains("TryPick"));
        let src = render(2, VariantKind::Base);
        assert!(src.contains("public bool TryPickT0(out T0 value, out T1 remainder)"));
        assert!(src.contains("public bool TryPickT1(out T1 value, out T0 remainder)"));
    }

    #[test]
    fn try_pick_narrows_to_reindexed_union() {
        let src = render(3, VariantKind::Value);
        assert!(src.contains("public bool TryPickT0(out T0 value, out OneOf<T1, T2> remainder)"));
        assert!(src.contains("value = IsT0 ? AsT0 : default;"));
        assert!(src.contains("1 => OneOf<T1, T2>.FromT0(AsT1),"));
        assert!(src.contains("2 => OneOf<T1, T2>.FromT1(AsT2),"));
        assert!(src.contains("return IsT0;"));
    }

    #[test]
    fn equality_formatting_and_hash_dispatch_on_index() {
        let src = render(4, VariantKind::Value);
        assert!(src.contains("3 => Equals(_value3, other._value3),"));
        assert!(src.contains("3 => FormatValue(_value3),"));
        assert!(src.contains("3 => _value3?.GetHashCode(),"));
        assert!(src.contains("return (hashCode * 397) ^ _index;"));
        assert!(src.contains(
            "_ => throw new InvalidOperationException(\"Unexpected index, which indicates a problem in the OneOf codegen.\")"
        ));
    }

    #[test]
    fn output_has_no_unrendered_template_syntax() {
        for kind in VariantKind::ALL {
            let src = render(5, kind);
            assert!(!src.contains("{{"));
            assert!(!src.contains("{%"));
            assert!(src.ends_with("}\n"));
        }
    }
}
