//! Application state and logic

use std::time::{Duration, Instant};

use shelf_core::{Book, KeyValueStore, Session, ViewState, ALL_CATEGORY};

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Nav,
    Books,
    Detail,
}

impl ActivePane {
    /// Move to the next pane (wrapping)
    pub fn next(self) -> Self {
        match self {
            ActivePane::Nav => ActivePane::Books,
            ActivePane::Books => ActivePane::Detail,
            ActivePane::Detail => ActivePane::Nav,
        }
    }

    /// Move to the previous pane (wrapping)
    pub fn prev(self) -> Self {
        match self {
            ActivePane::Nav => ActivePane::Detail,
            ActivePane::Books => ActivePane::Nav,
            ActivePane::Detail => ActivePane::Books,
        }
    }
}

/// Entries in the left navigation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    AllBooks,
    Favorites,
    Category(String),
}

/// Application state
pub struct App<S: KeyValueStore> {
    /// Catalog, favorites and view state
    pub session: Session<S>,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Which pane has focus
    pub active_pane: ActivePane,
    /// Navigation entries: All Books, Favorites, then categories
    pub nav: Vec<NavItem>,
    /// Currently selected navigation index
    pub nav_index: usize,
    /// Currently selected book index within the visible list
    pub book_index: usize,
    /// Scroll offset for detail pane
    pub detail_scroll: u16,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Whether the about overlay is visible
    pub show_about: bool,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<Instant>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut nav = vec![NavItem::AllBooks, NavItem::Favorites];
        nav.extend(
            session
                .categories()
                .iter()
                .filter(|c| c.as_str() != ALL_CATEGORY)
                .map(|c| NavItem::Category(c.clone())),
        );

        let mut app = Self {
            session,
            should_quit: false,
            active_pane: ActivePane::Books,
            nav,
            nav_index: 0,
            book_index: 0,
            detail_scroll: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            show_about: false,
            pending_g: None,
        };
        if let Some(warning) = app.session.storage_warning().map(str::to_string) {
            app.set_status(format!("Favorites not saved: {}", warning));
        }
        app
    }

    pub fn state(&self) -> &ViewState {
        self.session.state()
    }

    /// Books for the current view
    pub fn books(&self) -> Vec<&Book> {
        self.session.visible_books()
    }

    /// Get the currently selected book
    pub fn current_book(&self) -> Option<&Book> {
        self.books().get(self.book_index).copied()
    }

    pub fn current_nav(&self) -> Option<&NavItem> {
        self.nav.get(self.nav_index)
    }

    /// Message for an empty book list
    pub fn empty_message(&self) -> &'static str {
        if self.state().show_favorites {
            "No books found. Add some favorites!"
        } else {
            "No books found. Try a different category."
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_about(&mut self) {
        self.show_about = !self.show_about;
    }

    /// Move selection up in the current pane
    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Nav => {
                self.nav_index = self.nav_index.saturating_sub(1);
            }
            ActivePane::Books => {
                if self.book_index > 0 {
                    self.book_index -= 1;
                    self.detail_scroll = 0;
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the current pane
    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Nav => {
                if self.nav_index < self.nav.len().saturating_sub(1) {
                    self.nav_index += 1;
                }
            }
            ActivePane::Books => {
                if self.book_index < self.books().len().saturating_sub(1) {
                    self.book_index += 1;
                    self.detail_scroll = 0;
                }
            }
            ActivePane::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }

    /// Move selection to first item in the current pane (vim 'gg')
    pub fn move_to_first(&mut self) {
        match self.active_pane {
            ActivePane::Nav => self.nav_index = 0,
            ActivePane::Books => {
                self.book_index = 0;
                self.detail_scroll = 0;
            }
            ActivePane::Detail => self.detail_scroll = 0,
        }
    }

    /// Move selection to last item in the current pane (vim 'G')
    pub fn move_to_last(&mut self) {
        match self.active_pane {
            ActivePane::Nav => self.nav_index = self.nav.len().saturating_sub(1),
            ActivePane::Books => {
                self.book_index = self.books().len().saturating_sub(1);
                self.detail_scroll = 0;
            }
            ActivePane::Detail => {}
        }
    }

    pub fn next_pane(&mut self) {
        self.active_pane = self.active_pane.next();
    }

    pub fn prev_pane(&mut self) {
        self.active_pane = self.active_pane.prev();
    }

    /// Handle Enter key in current pane
    pub fn handle_enter(&mut self) {
        match self.active_pane {
            ActivePane::Nav => {
                self.apply_nav();
                self.active_pane = ActivePane::Books;
            }
            ActivePane::Books => self.open_current(),
            ActivePane::Detail => {}
        }
    }

    /// Apply the selected navigation entry to the view
    pub fn apply_nav(&mut self) {
        match self.current_nav().cloned() {
            Some(NavItem::AllBooks) | None => {
                self.session.view_mut().show_all_view();
            }
            Some(NavItem::Favorites) => {
                self.session.view_mut().show_favorites_view();
            }
            Some(NavItem::Category(category)) => {
                self.session.view_mut().set_category(&category);
            }
        }
        self.book_index = 0;
        self.detail_scroll = 0;
    }

    /// Switch to the favorites view (F)
    pub fn show_favorites(&mut self) {
        self.session.view_mut().show_favorites_view();
        self.sync_nav_to_state();
        self.book_index = 0;
    }

    /// Switch back to the whole catalog (A)
    pub fn show_all(&mut self) {
        self.session.view_mut().show_all_view();
        self.sync_nav_to_state();
        self.book_index = 0;
    }

    /// Point the nav selection at the entry matching the view state
    fn sync_nav_to_state(&mut self) {
        let state = self.session.state();
        let target = if state.show_favorites {
            NavItem::Favorites
        } else if state.has_category_filter() {
            NavItem::Category(state.active_category.clone())
        } else {
            NavItem::AllBooks
        };
        if let Some(index) = self.nav.iter().position(|item| *item == target) {
            self.nav_index = index;
        }
    }

    /// Toggle favorite on the selected book
    pub fn toggle_current_favorite(&mut self) {
        let Some(book) = self.current_book() else {
            return;
        };
        let id = book.id.clone();
        let title = book.short_title().to_string();

        match self.session.toggle_favorite(&id) {
            Ok(true) => self.set_status(format!("Added '{}' to favorites", title)),
            Ok(false) => self.set_status(format!("Removed '{}' from favorites", title)),
            Err(e) => self.set_status(format!("Failed to update favorites: {}", e)),
        }
        if let Some(warning) = self.session.storage_warning().map(str::to_string) {
            self.set_status(format!("Favorites not saved: {}", warning));
        }

        self.clamp_book_index();
    }

    /// Open the selected book's purchase link
    pub fn open_current(&mut self) {
        let Some(book) = self.current_book() else {
            return;
        };
        self.session.report_selection(book);
        let link = book.purchase_link.clone();
        let title = book.short_title().to_string();

        if link.is_empty() {
            self.set_status(format!("'{}' has no purchase link", title));
            return;
        }
        match open::that_detached(&link) {
            Ok(()) => self.set_status(format!("Opened '{}'", title)),
            Err(e) => self.set_status(format!("Failed to open: {}", e)),
        }
    }

    /// Keep the book selection inside the visible list
    fn clamp_book_index(&mut self) {
        let len = self.books().len();
        if len == 0 {
            self.book_index = 0;
        } else {
            self.book_index = self.book_index.min(len - 1);
        }
    }
}
