//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are plain strings; the commands parse them back with `FromStr`, so a
//! user who ignores the suggestions still gets a validation message.

use crate::{
    bot::BotData,
    core::{expense::Periodicity, sort::SortKey},
    errors::Error,
};

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Case-insensitive substring filter over `candidates`, keeping their order.
fn matching<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests item names already in the store, so recurring bills keep one spelling.
pub async fn autocomplete_item_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(mut names) = ctx
        .data()
        .with_session(ctx.author().id.get(), |view| {
            view.records()
                .iter()
                .map(|record| record.item.clone())
                .collect::<Vec<_>>()
        })
        .await
    else {
        return Vec::new();
    };

    names.sort_by_key(|name| name.to_lowercase());
    names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    matching(names, partial)
}

/// Suggests periodicity labels.
#[allow(clippy::unused_async)]
pub async fn autocomplete_periodicity(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(Periodicity::ALL.map(|p| p.label().to_string()), partial)
}

/// Suggests sortable column names.
#[allow(clippy::unused_async)]
pub async fn autocomplete_sort_key(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(SortKey::ALL.map(|key| key.field_name().to_string()), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        let labels = Periodicity::ALL.map(|p| p.label().to_string());
        assert_eq!(matching(labels.clone(), "ANN"), vec!["Semiannual", "Annual"]);
        assert_eq!(matching(labels, "").len(), 6);
    }

    #[test]
    fn test_matching_sort_keys() {
        let keys = SortKey::ALL.map(|key| key.field_name().to_string());
        assert_eq!(matching(keys, "date"), vec!["maintenance_date"]);
    }
}
