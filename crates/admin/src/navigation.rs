//! Sidebar navigation shell.
//!
//! The menu is a static, language-independent table of paths, icons and
//! label keys. [`build_menu`] labels it for the active language on every
//! render, and [`ShellView`] combines it with the browser's [`NavState`] and
//! the page's navigation path into what the layout template draws.
//!
//! # Rendering rules
//!
//! - A link is active when its path equals the page's navigation path.
//! - A group is active when any child is active, expanded or not.
//! - Expanded groups show `chevron-down`; collapsed groups point in the
//!   reading direction (`chevron-right` for LTR, `chevron-left` for RTL).
//! - The icon margin sits between icon and label, so it flips with direction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hadawi_core::Direction;

use crate::i18n::Translator;
use crate::models::{CurrentAdmin, Resource};

/// A collapsible menu group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuGroup {
    Catalog,
    Locations,
    Configuration,
}

impl MenuGroup {
    pub const ALL: [Self; 3] = [Self::Catalog, Self::Locations, Self::Configuration];

    /// URL key, as in `/nav/groups/{key}`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Locations => "locations",
            Self::Configuration => "configuration",
        }
    }

    /// Parse a URL key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }
}

struct LinkDef {
    path: &'static str,
    icon: &'static str,
    label_key: &'static str,
}

enum EntryDef {
    Link(LinkDef),
    Group {
        group: MenuGroup,
        icon: &'static str,
        label_key: &'static str,
        children: &'static [LinkDef],
    },
}

const fn link(path: &'static str, icon: &'static str, label_key: &'static str) -> LinkDef {
    LinkDef {
        path,
        icon,
        label_key,
    }
}

const MENU: &[EntryDef] = &[
    EntryDef::Link(link("/dashboard", "home", "nav-dashboard")),
    EntryDef::Link(link("/users", "users", "nav-users")),
    EntryDef::Link(link("/occasions", "gift", "nav-occasions")),
    EntryDef::Link(link("/payments", "credit-card", "nav-payments")),
    EntryDef::Link(link("/withdrawals", "wallet", "nav-withdrawals")),
    EntryDef::Link(link("/promo-codes", "ticket", "nav-promo-codes")),
    EntryDef::Link(link("/banners", "image", "nav-banners")),
    EntryDef::Link(link("/notifications", "bell", "nav-notifications")),
    EntryDef::Link(link("/delivery-partners", "truck", "nav-delivery-partners")),
    EntryDef::Link(link("/delivery-records", "clipboard", "nav-delivery-records")),
    EntryDef::Group {
        group: MenuGroup::Catalog,
        icon: "package",
        label_key: "nav-catalog",
        children: &[
            link("/companies", "building", "nav-companies"),
            link("/products", "box", "nav-products"),
            link("/categories", "tag", "nav-categories"),
            link("/brands", "award", "nav-brands"),
            link("/offers", "percent", "nav-offers"),
            link("/packaging", "archive", "nav-packaging"),
        ],
    },
    EntryDef::Group {
        group: MenuGroup::Locations,
        icon: "map",
        label_key: "nav-locations",
        children: &[
            link("/regions", "globe", "nav-regions"),
            link("/cities", "map-pin", "nav-cities"),
        ],
    },
    EntryDef::Group {
        group: MenuGroup::Configuration,
        icon: "sliders",
        label_key: "nav-configuration",
        children: &[
            link("/occasion-types", "calendar", "nav-occasion-types"),
            link("/taxes", "receipt", "nav-taxes"),
            link("/settings", "settings", "nav-settings"),
        ],
    },
    EntryDef::Link(link("/analytics", "bar-chart", "nav-analytics")),
];

/// Icon of the menu link at `path`, or a neutral default.
#[must_use]
pub fn icon_for(path: &str) -> &'static str {
    MENU.iter()
        .flat_map(|entry| match entry {
            EntryDef::Link(link) => std::slice::from_ref(link),
            EntryDef::Group { children, .. } => *children,
        })
        .find(|link| link.path == path)
        .map_or("circle", |link| link.icon)
}

/// A labelled menu entry.
///
/// Links carry a path; group headers carry their [`MenuGroup`] and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub path: String,
    pub icon: &'static str,
    pub label: String,
    pub group: Option<MenuGroup>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Whether this entry is active for the page's navigation path.
    #[must_use]
    pub fn is_active(&self, nav_path: &str) -> bool {
        if self.group.is_some() {
            self.children.iter().any(|child| child.is_active(nav_path))
        } else {
            self.path == nav_path
        }
    }
}

/// Label the static menu table in the translator's language.
#[must_use]
pub fn build_menu(t: &Translator) -> Vec<MenuItem> {
    let label = |def: &LinkDef| MenuItem {
        path: def.path.to_owned(),
        icon: def.icon,
        label: t.t(def.label_key),
        group: None,
        children: Vec::new(),
    };

    MENU.iter()
        .map(|entry| match entry {
            EntryDef::Link(def) => label(def),
            EntryDef::Group {
                group,
                icon,
                label_key,
                children,
            } => MenuItem {
                path: String::new(),
                icon: *icon,
                label: t.t(label_key),
                group: Some(*group),
                children: children.iter().map(label).collect(),
            },
        })
        .collect()
}

/// Menu path of the page at `path`.
///
/// Every page under a resource slug belongs to that resource's list path, so
/// `/occasions/42/edit` maps to `/occasions`. Other paths map to themselves.
#[must_use]
pub fn nav_path_for(path: &str) -> String {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    Resource::from_slug(first).map_or_else(|| path.to_owned(), Resource::list_path)
}

/// Chevron icon for a group header.
#[must_use]
pub const fn chevron_icon(expanded: bool, direction: Direction) -> &'static str {
    match (expanded, direction) {
        (true, _) => "chevron-down",
        (false, Direction::Ltr) => "chevron-right",
        (false, Direction::Rtl) => "chevron-left",
    }
}

/// Utility class putting the gap on the label side of an icon.
#[must_use]
pub const fn icon_margin_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => "mr-3",
        Direction::Rtl => "ml-3",
    }
}

/// Per-browser sidebar state, stored in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    /// Whether the mobile sidebar panel is open.
    #[serde(default)]
    pub sidebar_open: bool,
    /// Expanded flag per group; absent means collapsed.
    #[serde(default)]
    pub expanded: BTreeMap<MenuGroup, bool>,
    /// Set when a shell toggle redirects back to its page; the next page
    /// render keeps the sidebar as the toggle left it.
    #[serde(default)]
    pub hold_sidebar: bool,
}

impl NavState {
    /// Whether `group` is expanded.
    #[must_use]
    pub fn is_expanded(&self, group: MenuGroup) -> bool {
        self.expanded.get(&group).copied().unwrap_or(false)
    }

    /// Flip one group; other groups are untouched.
    pub fn toggle_group(&mut self, group: MenuGroup) {
        let expanded = !self.is_expanded(group);
        self.expanded.insert(group, expanded);
    }

    /// Open or close the mobile sidebar.
    pub const fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Close the mobile sidebar (overlay click).
    pub const fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// Keep the sidebar untouched for the page render that follows a
    /// toggle's redirect.
    pub const fn hold_sidebar_once(&mut self) {
        self.hold_sidebar = true;
    }

    /// Record a page render. Every render closes the sidebar except the one
    /// right after [`hold_sidebar_once`](Self::hold_sidebar_once).
    ///
    /// Returns whether the state changed.
    pub const fn render_page(&mut self) -> bool {
        if self.hold_sidebar {
            self.hold_sidebar = false;
            return true;
        }
        if self.sidebar_open {
            self.sidebar_open = false;
            return true;
        }
        false
    }
}

/// A sidebar link as drawn.
#[derive(Debug, Clone)]
pub struct SidebarLink {
    pub path: String,
    pub icon: &'static str,
    pub label: String,
    pub active: bool,
}

/// A top-level sidebar entry as drawn.
#[derive(Debug, Clone)]
pub struct SidebarEntry {
    pub link: SidebarLink,
    /// Set for group headers.
    pub group: Option<SidebarGroup>,
}

/// Group header state as drawn.
#[derive(Debug, Clone)]
pub struct SidebarGroup {
    pub key: &'static str,
    pub expanded: bool,
    pub chevron: &'static str,
    pub children: Vec<SidebarLink>,
}

/// Footer block under the menu.
#[derive(Debug, Clone)]
pub struct FooterView {
    pub name: String,
    pub role: String,
    pub initials: String,
    /// Native name of the language the toggle switches to.
    pub toggle_label: String,
    pub toggle_code: &'static str,
}

/// Everything the layout needs to draw the shell around a page.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub lang: &'static str,
    pub dir: &'static str,
    pub nav_path: String,
    /// Local path the shell's forms return to.
    pub return_to: String,
    pub sidebar_open: bool,
    pub icon_margin: &'static str,
    pub entries: Vec<SidebarEntry>,
    pub footer: FooterView,
}

impl ShellView {
    /// Assemble the shell for one page render.
    #[must_use]
    pub fn build(
        t: &Translator,
        admin: &CurrentAdmin,
        nav: &NavState,
        nav_path: &str,
        return_to: &str,
    ) -> Self {
        let direction = t.direction();
        let to_link = |item: &MenuItem| SidebarLink {
            path: item.path.clone(),
            icon: item.icon,
            label: item.label.clone(),
            active: item.is_active(nav_path),
        };

        let entries = build_menu(t)
            .iter()
            .map(|item| SidebarEntry {
                link: to_link(item),
                group: item.group.map(|group| {
                    let expanded = nav.is_expanded(group);
                    SidebarGroup {
                        key: group.key(),
                        expanded,
                        chevron: chevron_icon(expanded, direction),
                        children: item.children.iter().map(to_link).collect(),
                    }
                }),
            })
            .collect();

        Self {
            lang: t.language().code(),
            dir: direction.as_str(),
            nav_path: nav_path.to_owned(),
            return_to: return_to.to_owned(),
            sidebar_open: nav.sidebar_open,
            icon_margin: icon_margin_class(direction),
            entries,
            footer: FooterView::build(t, admin),
        }
    }
}

impl FooterView {
    fn build(t: &Translator, admin: &CurrentAdmin) -> Self {
        let name = admin
            .display_name()
            .unwrap_or_else(|| t.t("footer-generic-name"));
        let role = match &admin.role {
            Some(role) => role
                .label_key()
                .map_or_else(|| role.to_string(), |key| t.t(key)),
            None => t.t("role-admin"),
        };
        let next = t.language().toggled();
        Self {
            initials: initials(&name),
            name,
            role,
            toggle_label: next.native_name().to_owned(),
            toggle_code: next.code(),
        }
    }
}

/// Up to two initials for the avatar badge.
fn initials(name: &str) -> String {
    let source = name.split('@').next().unwrap_or(name);
    let letters: String = source
        .split(|c: char| c.is_whitespace() || c == '.' || c == '_')
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_owned() } else { letters }
}
