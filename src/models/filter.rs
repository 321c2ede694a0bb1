//! Filter selection model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label of the wildcard option in every dimension.
pub const ANY_LABEL: &str = "Any";

/// Query/CLI token for the wildcard. Distinct from [`ANY_LABEL`] so that a
/// map or build order literally named "Any" stays selectable.
pub const ANY_PARAM: &str = "*";

/// A filter value: either a concrete value or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
pub enum Selection<T: Clone> {
    Any,
    Only(T),
}

impl<T: Clone> Default for Selection<T> {
    fn default() -> Self {
        Selection::Any
    }
}

impl<T: Clone> Selection<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }

    /// Whether `value` passes this selection. `Any` accepts everything,
    /// including absent values; a concrete selection never matches `None`.
    pub fn accepts<Q>(&self, value: Option<&Q>) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        match self {
            Selection::Any => true,
            Selection::Only(wanted) => value.is_some_and(|v| wanted == v),
        }
    }
}

impl<T: Clone> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::Any,
        }
    }
}

impl<T: Clone> From<Selection<T>> for Option<T> {
    fn from(value: Selection<T>) -> Self {
        match value {
            Selection::Any => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl Selection<String> {
    /// Parse a query/CLI parameter. Absent, blank or [`ANY_PARAM`] means no
    /// constraint; anything else, "Any" included, is a concrete value.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some(ANY_PARAM) => Selection::Any,
            Some(p) => Selection::Only(p.to_string()),
        }
    }

    /// Inverse of [`Selection::from_param`]: `None` for the wildcard.
    pub fn to_param(&self) -> Option<&str> {
        match self {
            Selection::Any => None,
            Selection::Only(v) => Some(v),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::Any => ANY_LABEL,
            Selection::Only(v) => v,
        }
    }
}

/// The four filterable dimensions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    BuildOrder,
    Civilization,
    Map,
    GameMode,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::BuildOrder,
        Dimension::Civilization,
        Dimension::Map,
        Dimension::GameMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::BuildOrder => "build_order",
            Dimension::Civilization => "civilization",
            Dimension::Map => "map",
            Dimension::GameMode => "game_mode",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "build_order" | "build" => Ok(Dimension::BuildOrder),
            "civilization" | "civ" => Ok(Dimension::Civilization),
            "map" => Ok(Dimension::Map),
            "game_mode" | "mode" => Ok(Dimension::GameMode),
            other => Err(format!("unknown dimension: {}", other)),
        }
    }
}

/// The active query over the match collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub civilization: Selection<String>,
    #[serde(default)]
    pub build_order: Selection<String>,
    #[serde(default)]
    pub map: Selection<String>,
    /// Accepted but not enforced: match records carry no game mode yet.
    #[serde(default)]
    pub game_mode: Selection<String>,
}

impl FilterSelection {
    /// Selection with every dimension set to `Any`.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_civilization(mut self, civ: impl Into<String>) -> Self {
        self.civilization = Selection::Only(civ.into());
        self
    }

    pub fn with_build_order(mut self, build: impl Into<String>) -> Self {
        self.build_order = Selection::Only(build.into());
        self
    }

    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Selection::Only(map.into());
        self
    }

    pub fn with_game_mode(mut self, mode: impl Into<String>) -> Self {
        self.game_mode = Selection::Only(mode.into());
        self
    }

    pub fn get(&self, dimension: Dimension) -> &Selection<String> {
        match dimension {
            Dimension::BuildOrder => &self.build_order,
            Dimension::Civilization => &self.civilization,
            Dimension::Map => &self.map,
            Dimension::GameMode => &self.game_mode,
        }
    }

    pub fn set(&mut self, dimension: Dimension, selection: Selection<String>) {
        match dimension {
            Dimension::BuildOrder => self.build_order = selection,
            Dimension::Civilization => self.civilization = selection,
            Dimension::Map => self.map = selection,
            Dimension::GameMode => self.game_mode = selection,
        }
    }
}

/// One selectable entry of a filter menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: Selection<String>,
    pub label: String,
}

impl FilterOption {
    pub fn value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value: Selection::Only(value),
        }
    }

    pub fn any() -> Self {
        Self {
            value: Selection::Any,
            label: ANY_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accepts() {
        let any: Selection<String> = Selection::Any;
        assert!(any.accepts::<str>(None));
        assert!(any.accepts(Some("Franks")));

        let franks = Selection::Only("Franks".to_string());
        assert!(franks.accepts(Some("Franks")));
        assert!(!franks.accepts(Some("Mongols")));
        assert!(!franks.accepts::<str>(None));
    }

    #[test]
    fn test_selection_from_param() {
        assert_eq!(Selection::from_param(None), Selection::Any);
        assert_eq!(Selection::from_param(Some("")), Selection::Any);
        assert_eq!(Selection::from_param(Some("*")), Selection::Any);
        assert_eq!(
            Selection::from_param(Some("Any")),
            Selection::Only("Any".to_string())
        );
        assert_eq!(
            Selection::from_param(Some(" Arabia ")),
            Selection::Only("Arabia".to_string())
        );
    }

    #[test]
    fn test_option_named_any_round_trips_through_param() {
        let literal = FilterOption::value("Any");
        let parsed = Selection::from_param(literal.value.to_param());
        assert_eq!(parsed, literal.value);

        let wildcard = FilterOption::any();
        assert_eq!(Selection::from_param(wildcard.value.to_param()), Selection::Any);
    }

    #[test]
    fn test_selection_serializes_any_as_null() {
        let any: Selection<String> = Selection::Any;
        assert_eq!(serde_json::to_string(&any).unwrap(), "null");

        let back: Selection<String> = serde_json::from_str("\"Arena\"").unwrap();
        assert_eq!(back, Selection::Only("Arena".to_string()));
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("civ".parse::<Dimension>(), Ok(Dimension::Civilization));
        assert_eq!("build-order".parse::<Dimension>(), Ok(Dimension::BuildOrder));
        assert_eq!("GAME_MODE".parse::<Dimension>(), Ok(Dimension::GameMode));
        assert!("elo".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_filter_selection_get_set() {
        let mut sel = FilterSelection::any().with_map("Arabia");
        assert_eq!(sel.get(Dimension::Map).label(), "Arabia");
        assert!(sel.get(Dimension::Civilization).is_any());

        sel.set(Dimension::Map, Selection::Any);
        assert_eq!(sel, FilterSelection::any());
    }

    #[test]
    fn test_filter_option_labels() {
        let opt = FilterOption::value("Scouts");
        assert_eq!(opt.label, "Scouts");
        assert_eq!(opt.value, Selection::Only("Scouts".to_string()));
        assert_eq!(FilterOption::any().label, ANY_LABEL);
    }
}
