//! Activation order of discovered plugins

/// Plugin that always goes to the end of the sidebar
pub const ABOUT_PLUGIN: &str = "About";

/// Result of ordering the discovered plugins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutcome {
    /// Plugin names in activation order
    pub order: Vec<String>,
    /// Home plugin for this session
    pub home: Option<String>,
    /// True when the preferred home was not installed and `home` fell back
    /// to the first plugin in `order`
    pub adopted: bool,
}

/// Order discovered plugins and pick the session's home plugin.
///
/// 1. `About` swaps places with the last plugin.
/// 2. An installed `preferred_home` swaps places with the first plugin.
/// 3. Otherwise the first plugin (after step 1) is adopted as home.
///
/// Both moves are positional swaps, not stable moves: the displaced plugin
/// takes the mover's old slot. The function is pure; committing an adopted
/// home to session state is up to the caller.
pub fn compute_order(mut names: Vec<String>, preferred_home: Option<&str>) -> OrderOutcome {
    if let Some(about) = names.iter().position(|n| n == ABOUT_PLUGIN) {
        let last = names.len() - 1;
        names.swap(about, last);
    }

    if let Some(home) = preferred_home
        && let Some(idx) = names.iter().position(|n| n == home)
    {
        names.swap(idx, 0);
        return OrderOutcome {
            order: names,
            home: Some(home.to_string()),
            adopted: false,
        };
    }

    let home = names.first().cloned();
    OrderOutcome {
        adopted: home.is_some(),
        order: names,
        home,
    }
}
