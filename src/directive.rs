//! Flex-Layout directive recognition and their Tailwind equivalents.
//!
//! Resolution is pure: a directive and its raw value map to an [`Effect`],
//! which the attribute folder then applies to the element's class list.
//! Unrecognized values resolve to an empty effect rather than an error.

use crate::deferred::DeferredTransform;
use crate::node::Attribute;

const FILL_UTILITIES: &[&str] = &["m-0", "w-full", "h-full", "min-w-full", "min-h-full"];

const INLINE: DeferredTransform = DeferredTransform::RewriteToken {
    from: "flex",
    to: "inline-flex",
};

const STRETCH: DeferredTransform = DeferredTransform::AppendByDirection {
    column_tokens: &["flex-col", "flex-col-reverse"],
    if_column: "max-h-full",
    otherwise: "max-w-full",
};

/// What a directive contributes to its element's class list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effect {
    /// Utilities added immediately, in order
    pub utilities: Vec<&'static str>,
    /// Transforms applied once the element's class list is complete
    pub deferred: Vec<DeferredTransform>,
}

impl Effect {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn utilities(utilities: &[&'static str]) -> Self {
        Self {
            utilities: utilities.to_vec(),
            deferred: Vec::new(),
        }
    }

    pub fn deferred(transform: DeferredTransform) -> Self {
        Self {
            utilities: Vec::new(),
            deferred: vec![transform],
        }
    }

    pub fn is_noop(&self) -> bool {
        self.utilities.is_empty() && self.deferred.is_empty()
    }

    /// Compose `next` on top of this effect
    fn then(mut self, next: Effect) -> Self {
        self.utilities.extend(next.utilities);
        self.deferred.extend(next.deferred);
        self
    }
}

/// `fxFlexAlign` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfAlign {
    Start,
    Center,
    End,
    Baseline,
    Stretch,
}

impl SelfAlign {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            "baseline" => Some(Self::Baseline),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }

    fn effect(self) -> Effect {
        let utility = match self {
            Self::Start => "self-start",
            Self::Center => "self-center",
            Self::End => "self-end",
            Self::Baseline => "self-baseline",
            Self::Stretch => "self-stretch",
        };
        Effect::utilities(&[utility])
    }
}

/// First token of an `fxLayout` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl LayoutDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "row" => Some(Self::Row),
            "column" => Some(Self::Column),
            "row-reverse" => Some(Self::RowReverse),
            "column-reverse" => Some(Self::ColumnReverse),
            _ => None,
        }
    }

    fn effect(self) -> Effect {
        match self {
            Self::Row => Effect::utilities(&["flex"]),
            Self::Column => Effect::utilities(&["flex", "flex-col"]),
            Self::RowReverse => Effect::utilities(&["flex", "flex-row-reverse"]),
            Self::ColumnReverse => Effect::utilities(&["flex", "flex-col-reverse"]),
        }
    }
}

/// Optional second token of an `fxLayout` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutModifier {
    Wrap,
    Inline,
}

impl LayoutModifier {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "wrap" => Some(Self::Wrap),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }

    fn effect(self) -> Effect {
        match self {
            Self::Wrap => Effect::utilities(&["flex-wrap"]),
            Self::Inline => Effect::deferred(INLINE),
        }
    }
}

/// Main-axis half of an `fxLayoutAlign` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAxis {
    Start,
    Center,
    End,
    SpaceAround,
    SpaceBetween,
    SpaceEvenly,
}

impl MainAxis {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" | "flex-start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" | "flex-end" => Some(Self::End),
            "space-around" => Some(Self::SpaceAround),
            "space-between" => Some(Self::SpaceBetween),
            "space-evenly" => Some(Self::SpaceEvenly),
            _ => None,
        }
    }

    fn effect(self) -> Effect {
        let justify = match self {
            Self::Start => "justify-start",
            Self::Center => "justify-center",
            Self::End => "justify-end",
            Self::SpaceAround => "justify-around",
            Self::SpaceBetween => "justify-between",
            Self::SpaceEvenly => "justify-evenly",
        };
        Effect::utilities(&["flex", justify])
    }
}

/// Cross-axis half of an `fxLayoutAlign` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAxis {
    Start,
    Center,
    End,
    SpaceAround,
    SpaceBetween,
    Baseline,
    Stretch,
}

impl CrossAxis {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "start" | "flex-start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" | "flex-end" => Some(Self::End),
            "space-around" => Some(Self::SpaceAround),
            "space-between" => Some(Self::SpaceBetween),
            "baseline" => Some(Self::Baseline),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }

    fn effect(self) -> Effect {
        match self {
            Self::Start => Effect::utilities(&["flex", "items-start", "content-start"]),
            Self::Center => Effect::utilities(&["flex", "items-center", "content-center"]),
            Self::End => Effect::utilities(&["flex", "items-end", "content-end"]),
            Self::SpaceAround => Effect::utilities(&["flex", "content-around"]),
            Self::SpaceBetween => Effect::utilities(&["flex", "content-between"]),
            Self::Baseline => Effect::utilities(&["flex", "items-baseline"]),
            // Depends on the flex direction the element ends up with
            Self::Stretch => Effect::deferred(STRETCH),
        }
    }
}

/// Directives written as property bindings, e.g. `[fxHide]="isHidden"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundDirective {
    FxFlex,
    FxHide,
    FxShow,
    /// Any other binding; kept as is
    Other,
}

impl BoundDirective {
    /// Rewrite the binding into an Angular class binding.
    ///
    /// Returns whether the attribute changed.
    pub fn rewrite(self, attribute: &mut Attribute) -> bool {
        match self {
            Self::FxFlex => attribute.name = "[class.flex]".to_string(),
            Self::FxHide => attribute.name = "[class.hidden]".to_string(),
            Self::FxShow => {
                attribute.name = "[class.hidden]".to_string();
                attribute.value = attribute
                    .value
                    .as_deref()
                    .map(|expression| format!("!{}", expression.replace('\n', "")));
            }
            Self::Other => return false,
        }
        true
    }
}

/// A recognized (or not) attribute, with its raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    FxFlex,
    FxFlexFill,
    FxHide(Option<&'a str>),
    FxShow(Option<&'a str>),
    FxFlexAlign(Option<&'a str>),
    FxLayout(Option<&'a str>),
    FxLayoutAlign(Option<&'a str>),
    Bound(BoundDirective),
    Unknown,
}

impl<'a> Directive<'a> {
    pub fn parse(attribute: &'a Attribute) -> Self {
        let value = attribute.value.as_deref();

        if let Some(bound) = attribute
            .name
            .strip_prefix('[')
            .and_then(|name| name.strip_suffix(']'))
        {
            return Directive::Bound(match bound {
                "fxFlex" => BoundDirective::FxFlex,
                "fxHide" => BoundDirective::FxHide,
                "fxShow" => BoundDirective::FxShow,
                _ => BoundDirective::Other,
            });
        }

        match attribute.name.as_str() {
            "fxFlex" => Directive::FxFlex,
            "fxFlexFill" | "fxFill" => Directive::FxFlexFill,
            "fxHide" => Directive::FxHide(value),
            "fxShow" => Directive::FxShow(value),
            "fxFlexAlign" => Directive::FxFlexAlign(value),
            "fxLayout" => Directive::FxLayout(value),
            "fxLayoutAlign" => Directive::FxLayoutAlign(value),
            _ => Directive::Unknown,
        }
    }

    /// Plain directives are consumed by the fold and contribute to the class list
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Directive::Bound(_) | Directive::Unknown)
    }

    /// Map the directive to the utilities it stands for
    pub fn resolve(&self) -> Effect {
        match *self {
            Directive::FxFlex => Effect::utilities(&["flex"]),
            Directive::FxFlexFill => Effect::utilities(FILL_UTILITIES),
            // Only the literal "false" switches these off
            Directive::FxHide(Some("false")) => Effect::none(),
            Directive::FxHide(_) => Effect::utilities(&["hidden"]),
            Directive::FxShow(Some("false")) => Effect::utilities(&["hidden"]),
            Directive::FxShow(_) => Effect::none(),
            Directive::FxFlexAlign(value) => value
                .and_then(SelfAlign::parse)
                .map(SelfAlign::effect)
                .unwrap_or_default(),
            Directive::FxLayout(value) => resolve_layout(value),
            Directive::FxLayoutAlign(value) => resolve_layout_align(value.unwrap_or("")),
            Directive::Bound(_) | Directive::Unknown => Effect::none(),
        }
    }
}

/// `fxLayout="<direction> [<modifier>]"`, anything past the second token is ignored.
///
/// A valueless `fxLayout` means `row`; an explicit blank value is unrecognized.
fn resolve_layout(value: Option<&str>) -> Effect {
    let mut tokens = value.unwrap_or("row").split_whitespace();
    let Some(direction) = tokens.next() else {
        return Effect::none();
    };
    let modifier = tokens.next();

    let effect = LayoutDirection::parse(direction)
        .map(LayoutDirection::effect)
        .unwrap_or_default();

    match modifier.and_then(LayoutModifier::parse) {
        Some(modifier) => effect.then(modifier.effect()),
        None => effect,
    }
}

/// `fxLayoutAlign="<main> [<cross>]"`, a lone main value doubles as the cross value
fn resolve_layout_align(value: &str) -> Effect {
    let mut tokens = value.split_whitespace();
    let Some(main) = tokens.next() else {
        return Effect::none();
    };
    let cross = tokens.next().unwrap_or(main);

    let cross_effect = CrossAxis::parse(cross).map(CrossAxis::effect).unwrap_or_default();
    let main_effect = MainAxis::parse(main).map(MainAxis::effect).unwrap_or_default();

    cross_effect.then(main_effect)
}
