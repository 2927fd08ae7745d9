use tracing::trace;

use crate::class_list::ClassList;
use crate::deferred::DeferredQueue;
use crate::directive::{Directive, Effect};
use crate::node::Attribute;
use crate::walker::RewriteStats;

/// Fold one element's attributes into their rewritten form.
///
/// Plain directives are consumed and their utilities merged into a single
/// class attribute, in the order the directives appear. Bound directives are
/// renamed in place and everything else passes through in order. The class
/// attribute, if it survives, always comes last; it is dropped when it ends up
/// without tokens.
pub fn fold_attributes(attributes: Vec<Attribute>, stats: &mut RewriteStats) -> Vec<Attribute> {
    let mut queue = DeferredQueue::new();
    let (mut class_slot, attributes) = extract_class(attributes);
    let mut folded = Vec::with_capacity(attributes.len() + 1);

    for mut attribute in attributes {
        let directive = Directive::parse(&attribute);
        match directive {
            Directive::Unknown => folded.push(attribute),
            Directive::Bound(bound) => {
                let original = attribute.name.clone();
                if bound.rewrite(&mut attribute) {
                    trace!(from = %original, to = %attribute.name, "rewrote bound directive");
                    stats.bindings_rewritten += 1;
                }
                folded.push(attribute);
            }
            directive => {
                let effect = directive.resolve();
                trace!(
                    directive = %attribute.name,
                    utilities = ?effect.utilities,
                    deferred = effect.deferred.len(),
                    "consumed directive"
                );
                let class = class_slot.get_or_insert_with(Attribute::empty_class);
                apply_effect(class, effect, &mut queue);
                stats.record_directive(&attribute.name);
            }
        }
    }

    if !queue.is_empty() {
        let class = class_slot.get_or_insert_with(Attribute::empty_class);
        let mut list = ClassList::parse(class.value_str());
        queue.drain_into(&mut list);
        class.value = Some(list.to_string());
    }

    if let Some(class) = class_slot.filter(|class| !class.value_str().trim().is_empty()) {
        folded.push(class);
    }

    folded
}

/// Split off the first class attribute wherever it sits; later ones are discarded
fn extract_class(attributes: Vec<Attribute>) -> (Option<Attribute>, Vec<Attribute>) {
    let mut class_slot = None;
    let mut rest = Vec::with_capacity(attributes.len());

    for attribute in attributes {
        if !attribute.is_class() {
            rest.push(attribute);
        } else if class_slot.is_none() {
            class_slot = Some(attribute);
        } else {
            trace!(value = attribute.value_str(), "dropping duplicate class attribute");
        }
    }

    (class_slot, rest)
}

/// Merge a directive's effect into the class attribute.
///
/// A no-op leaves the attribute exactly as written; anything else normalizes it.
fn apply_effect(class: &mut Attribute, effect: Effect, queue: &mut DeferredQueue) {
    if effect.is_noop() {
        return;
    }

    let mut list = ClassList::parse(class.value_str());
    list.extend(effect.utilities.iter().copied());
    class.value = Some(list.to_string());
    queue.extend(effect.deferred);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(attributes: Vec<Attribute>) -> Vec<Attribute> {
        fold_attributes(attributes, &mut RewriteStats::default())
    }

    fn names(attributes: &[Attribute]) -> Vec<&str> {
        attributes.iter().map(|attr| attr.name.as_str()).collect()
    }

    fn class_of(attributes: &[Attribute]) -> Option<&str> {
        attributes.iter().find(|attr| attr.is_class()).map(Attribute::value_str)
    }

    #[test]
    fn test_class_moves_last_and_directives_are_consumed() {
        let folded = fold(vec![
            Attribute::new("class", "card"),
            Attribute::new("id", "main"),
            Attribute::new("fxLayout", "column"),
            Attribute::new("(click)", "go()"),
        ]);

        assert_eq!(names(&folded), vec!["id", "(click)", "class"]);
        assert_eq!(class_of(&folded), Some("card flex flex-col"));
    }

    #[test]
    fn test_directives_compose_in_source_order() {
        let folded = fold(vec![
            Attribute::new("fxLayoutAlign", "center center"),
            Attribute::new("fxLayout", "column"),
            Attribute::valueless("fxFlex"),
        ]);

        assert_eq!(
            class_of(&folded),
            Some("flex items-center content-center justify-center flex-col")
        );
    }

    #[test]
    fn test_deferred_transforms_see_final_class_list() {
        // The inline rewrite is queued before fxFlexFill and fxLayoutAlign add
        // their tokens, yet it still applies to the merged list.
        let folded = fold(vec![
            Attribute::new("fxLayout", "column inline"),
            Attribute::new("fxLayoutAlign", "start stretch"),
            Attribute::valueless("fxFlexFill"),
        ]);

        assert_eq!(
            class_of(&folded),
            Some("inline-flex flex-col justify-start m-0 w-full h-full min-w-full min-h-full max-h-full")
        );
    }

    #[test]
    fn test_empty_class_is_removed() {
        let folded = fold(vec![Attribute::new("class", ""), Attribute::new("fxShow", "true")]);
        assert_eq!(names(&folded), Vec::<&str>::new());

        let folded = fold(vec![Attribute::new("title", "x"), Attribute::new("class", "  ")]);
        assert_eq!(names(&folded), vec!["title"]);
    }

    #[test]
    fn test_untouched_class_keeps_raw_value() {
        let folded = fold(vec![
            Attribute::new("class", "b  a\n b"),
            Attribute::new("fxFlexAlign", "sideways"),
        ]);
        assert_eq!(class_of(&folded), Some("b  a\n b"));
    }

    #[test]
    fn test_duplicate_class_attributes_keep_first() {
        let folded = fold(vec![
            Attribute::new("class", "first"),
            Attribute::new("class", "second"),
            Attribute::valueless("fxFlex"),
        ]);

        assert_eq!(names(&folded), vec!["class"]);
        assert_eq!(class_of(&folded), Some("first flex"));
    }

    #[test]
    fn test_class_after_directive_is_canonical() {
        let folded = fold(vec![
            Attribute::new("fxLayout", "column"),
            Attribute::new("class", "page"),
        ]);
        assert_eq!(class_of(&folded), Some("page flex flex-col"));
    }

    #[test]
    fn test_repeated_directive_is_fully_consumed() {
        let mut stats = RewriteStats::default();
        let folded = fold_attributes(
            vec![
                Attribute::new("fxLayoutAlign", "start stretch"),
                Attribute::new("fxLayoutAlign", "start stretch"),
            ],
            &mut stats,
        );

        assert_eq!(names(&folded), vec!["class"]);
        assert_eq!(class_of(&folded), Some("flex justify-start max-w-full"));
        assert_eq!(stats.directives_rewritten, 2);
        assert_eq!(stats.directives.get("fxLayoutAlign"), Some(&2));
    }

    #[test]
    fn test_bound_directives_keep_position() {
        let mut stats = RewriteStats::default();
        let folded = fold_attributes(
            vec![
                Attribute::new("[fxShow]", "open"),
                Attribute::new("class", "panel"),
                Attribute::new("[ngClass]", "extra"),
            ],
            &mut stats,
        );

        assert_eq!(names(&folded), vec!["[class.hidden]", "[ngClass]", "class"]);
        assert_eq!(folded[0].value_str(), "!open");
        assert_eq!(class_of(&folded), Some("panel"));
        assert_eq!(stats.bindings_rewritten, 1);
        assert_eq!(stats.directives_rewritten, 0);
    }
}
