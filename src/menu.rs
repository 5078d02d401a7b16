//! Menu model - menus, items, and the tree that owns them.
//!
//! Menus form a tree with child-to-parent back references. Nodes live
//! in a fixed-capacity arena ([`MenuTree`]) and refer to each other by
//! [`MenuId`], which breaks the reference cycle without shared
//! ownership: the tree owns every node, items hold ids.

use heapless::Vec;

use crate::config::AppConfig;
use crate::error::Error;
use crate::page::Page;

/// Maximum number of menus in the tree.
pub const MAX_MENUS: usize = 8;

/// Maximum number of items in one menu.
pub const MAX_ITEMS: usize = 8;

/// Index of a menu inside its [`MenuTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuId(usize);

/// What happens after an action page closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnClose {
    None,
    /// Re-read the motion gains from the config so the next animation
    /// uses the edited values.
    ReloadGains,
}

/// Behavior of one menu row.
#[derive(Clone, Copy)]
pub enum ItemKind {
    /// Descend into another menu.
    Submenu(MenuId),
    /// Open a page. `open` may decline by returning `None`.
    Action {
        open: fn(&AppConfig) -> Option<Page>,
        on_close: OnClose,
    },
    /// Toggle a boolean; the state is re-read on every draw.
    Switch {
        toggle: fn(&mut AppConfig),
        state: fn(&AppConfig) -> bool,
    },
}

/// One row in a menu.
#[derive(Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub kind: ItemKind,
}

impl MenuItem {
    pub const fn submenu(label: &'static str, submenu: MenuId) -> Self {
        Self {
            label,
            kind: ItemKind::Submenu(submenu),
        }
    }

    pub const fn action(label: &'static str, open: fn(&AppConfig) -> Option<Page>) -> Self {
        Self {
            label,
            kind: ItemKind::Action {
                open,
                on_close: OnClose::None,
            },
        }
    }

    pub const fn action_with_close(
        label: &'static str,
        open: fn(&AppConfig) -> Option<Page>,
        on_close: OnClose,
    ) -> Self {
        Self {
            label,
            kind: ItemKind::Action { open, on_close },
        }
    }

    pub const fn switch(
        label: &'static str,
        toggle: fn(&mut AppConfig),
        state: fn(&AppConfig) -> bool,
    ) -> Self {
        Self {
            label,
            kind: ItemKind::Switch { toggle, state },
        }
    }
}

/// An ordered list of items plus the selection cursor.
pub struct Menu {
    title: &'static str,
    parent: Option<MenuId>,
    items: Vec<MenuItem, MAX_ITEMS>,
    /// Selected row. Invariant: `selected < items.len()` when non-empty.
    pub selected: usize,
}

impl Menu {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            parent: None,
            items: Vec::new(),
            selected: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> &MenuItem {
        &self.items[index]
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Move the cursor one row down, saturating at the last item.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Move the cursor one row up, saturating at the first item.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Arena owning every menu node.
pub struct MenuTree {
    menus: Vec<Menu, MAX_MENUS>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self { menus: Vec::new() }
    }

    /// Allocate an empty menu and return its id.
    pub fn add_menu(&mut self, title: &'static str) -> Result<MenuId, Error> {
        let id = MenuId(self.menus.len());
        self.menus.push(Menu::new(title)).map_err(|_| Error::Capacity)?;
        Ok(id)
    }

    /// Append an item to `menu`. Adding a `Submenu` item establishes
    /// the child's parent back reference.
    pub fn add_item(&mut self, menu: MenuId, item: MenuItem) -> Result<(), Error> {
        if let ItemKind::Submenu(child) = item.kind {
            self.menus[child.0].parent = Some(menu);
        }
        self.menus[menu.0]
            .items
            .push(item)
            .map_err(|_| Error::Capacity)
    }

    pub fn menu(&self, id: MenuId) -> &Menu {
        &self.menus[id.0]
    }

    pub fn menu_mut(&mut self, id: MenuId) -> &mut Menu {
        &mut self.menus[id.0]
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_page(_: &AppConfig) -> Option<Page> {
        None
    }

    #[test]
    fn submenu_item_links_parent() {
        let mut tree = MenuTree::new();
        let root = tree.add_menu("Main").unwrap();
        let child = tree.add_menu("Settings").unwrap();
        tree.add_item(root, MenuItem::submenu("Settings", child))
            .unwrap();

        assert_eq!(tree.menu(child).parent(), Some(root));
        assert_eq!(tree.menu(root).parent(), None);
    }

    #[test]
    fn selection_saturates_at_bounds() {
        let mut tree = MenuTree::new();
        let root = tree.add_menu("Main").unwrap();
        tree.add_item(root, MenuItem::action("A", no_page)).unwrap();
        tree.add_item(root, MenuItem::action("B", no_page)).unwrap();

        let menu = tree.menu_mut(root);
        menu.select_prev();
        assert_eq!(menu.selected, 0);
        menu.select_next();
        menu.select_next();
        menu.select_next();
        assert_eq!(menu.selected, 1);
    }

    #[test]
    fn menu_capacity_is_enforced() {
        let mut tree = MenuTree::new();
        let root = tree.add_menu("Main").unwrap();
        for _ in 0..MAX_ITEMS {
            tree.add_item(root, MenuItem::action("x", no_page)).unwrap();
        }
        assert_eq!(
            tree.add_item(root, MenuItem::action("overflow", no_page)),
            Err(Error::Capacity)
        );
    }

    #[test]
    fn tree_capacity_is_enforced() {
        let mut tree = MenuTree::new();
        for _ in 0..MAX_MENUS {
            tree.add_menu("m").unwrap();
        }
        assert_eq!(tree.add_menu("overflow"), Err(Error::Capacity));
    }
}
