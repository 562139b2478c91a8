//! Layered variable metadata
//!
//! Metadata for a variable comes from several sources of increasing priority.
//! Each field is taken from the highest layer that sets it.

use super::model::VariableMeta;

fn pick<T>(base: Option<T>, over: Option<T>) -> Option<T> {
    over.or(base)
}

impl VariableMeta {
    /// Overlay `over` on top of `self`; fields set in `over` win
    pub fn layered(self, over: VariableMeta) -> VariableMeta {
        VariableMeta {
            var_type: pick(self.var_type, over.var_type),
            required: pick(self.required, over.required),
            default: pick(self.default, over.default),
            placeholder: pick(self.placeholder, over.placeholder),
            hint: pick(self.hint, over.hint),
            options: pick(self.options, over.options),
            auto_fill: pick(self.auto_fill, over.auto_fill),
        }
    }
}

/// Fold layers from lowest to highest priority
pub fn merge_layers<I>(layers: I) -> VariableMeta
where
    I: IntoIterator<Item = VariableMeta>,
{
    layers
        .into_iter()
        .fold(VariableMeta::default(), VariableMeta::layered)
}
