//! Application root state and event loop
//!
//! `App` owns the cart and order-edit aggregates, the HTTP client, and
//! the token store, and passes itself by reference to the draw
//! functions. Every user action issues at most one awaited request and
//! runs to completion before the next key is processed, so no two
//! requests are ever in flight together.

use crate::config::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use reef_client::{ClientError, HttpClient, TokenStore};
use shared::models::{
    CategoryList, LoginRequest, MenuItemCreate, MenuItemUpdate, MenuSection, OrderCreate,
    PaymentType, SHOP_TYPES, SignupRequest,
};
use shared::money;
use shared::{CartStore, OrderEditor};
use std::collections::HashSet;
use std::io::Stdout;
use std::time::Duration;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// Number of table columns on the grid
pub const TABLE_COLS: usize = 4;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Tables,
    Menu,
    Receipt,
    Payment,
    Orders,
    OrderDetail,
    AddItems,
    MenuAdmin,
}

/// Current input mode for screens with editable fields
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Active pane on the menu management screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AdminPane {
    #[default]
    Categories,
    Dishes,
}

/// Open form on the menu management screen
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AdminForm {
    #[default]
    None,
    AddCategory,
    AddDish,
    EditDish {
        id: String,
    },
}

/// Action waiting behind a confirmation alert
#[derive(Debug, Clone)]
pub enum PendingAction {
    DeleteOrders,
    DeleteCategory { list_id: String, name: String },
    DeleteMenuItem { id: String },
}

/// Alert flavor: plain dismiss or confirm/cancel
#[derive(Debug, Clone)]
pub enum AlertKind {
    Error,
    Info,
    Confirm(PendingAction),
}

/// Modal alert box
#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

/// One dish with its section, flattened for list screens
#[derive(Debug, Clone)]
pub struct DishRow {
    pub id: String,
    pub dish_name: String,
    pub price: f64,
    pub category: String,
}

pub struct App {
    pub config: AppConfig,
    pub client: HttpClient,
    pub token_store: TokenStore,

    // Aggregates
    pub cart: CartStore,
    pub editor: OrderEditor,

    // Navigation
    pub screen: Screen,
    pub input_mode: InputMode,
    pub focus: usize,
    pub is_loading: bool,
    pub should_quit: bool,
    pub alert: Option<Alert>,

    // Auth inputs
    pub phone_input: Input,
    pub password_input: Input,
    pub confirm_input: Input,
    pub shop_name_input: Input,
    pub shop_type_index: usize,

    // Menu cache for the current screen
    pub menu: Vec<MenuSection>,
    pub categories: Vec<CategoryList>,

    // Sales flow
    pub table_cursor: usize,
    pub category_tab: usize,
    pub dish_cursor: usize,
    pub receipt_cursor: usize,
    pub tax_input: Input,
    pub paid_input: Input,

    // Order history
    pub start_date_input: Input,
    pub end_date_input: Input,
    pub orders: Vec<shared::models::OrderSummary>,
    pub orders_loaded: bool,
    pub orders_cursor: usize,
    pub selected_order_ids: HashSet<String>,
    pub detail_cursor: usize,
    pub detail_missing: bool,
    pub add_items_cursor: usize,

    // Menu management
    pub admin_pane: AdminPane,
    pub admin_category_cursor: usize,
    pub admin_dish_cursor: usize,
    pub admin_form: AdminForm,
    pub category_input: Input,
    pub name_input: Input,
    pub price_input: Input,
}

impl App {
    pub fn new(config: AppConfig, client: HttpClient, token_store: TokenStore) -> Self {
        // A stored token skips the login screen; a 401 later sends us back
        let screen = if client.token().is_some() {
            Screen::Tables
        } else {
            Screen::Login
        };

        Self {
            config,
            client,
            token_store,
            cart: CartStore::new(),
            editor: OrderEditor::new(),
            screen,
            input_mode: InputMode::default(),
            focus: 0,
            is_loading: false,
            should_quit: false,
            alert: None,
            phone_input: Input::default(),
            password_input: Input::default(),
            confirm_input: Input::default(),
            shop_name_input: Input::default(),
            shop_type_index: 0,
            menu: Vec::new(),
            categories: Vec::new(),
            table_cursor: 0,
            category_tab: 0,
            dish_cursor: 0,
            receipt_cursor: 0,
            tax_input: Input::default(),
            paid_input: Input::default(),
            start_date_input: Input::default(),
            end_date_input: Input::default(),
            orders: Vec::new(),
            orders_loaded: false,
            orders_cursor: 0,
            selected_order_ids: HashSet::new(),
            detail_cursor: 0,
            detail_missing: false,
            add_items_cursor: 0,
            admin_pane: AdminPane::default(),
            admin_category_cursor: 0,
            admin_dish_cursor: 0,
            admin_form: AdminForm::default(),
            category_input: Input::default(),
            name_input: Input::default(),
            price_input: Input::default(),
        }
    }

    /// Run the TUI loop until quit
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> std::io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| crate::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        self.handle_key(key).await;
                    }
                }
            }
        }
        Ok(())
    }

    // ========== Alerts ==========

    fn info_alert(&mut self, title: &str, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.to_string(),
            message: message.into(),
            kind: AlertKind::Info,
        });
    }

    fn error_alert(&mut self, title: &str, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.to_string(),
            message: message.into(),
            kind: AlertKind::Error,
        });
    }

    /// Validation failures never reach the network
    fn validation_alert(&mut self, message: impl Into<String>) {
        self.error_alert("Validation", message);
    }

    fn confirm_alert(&mut self, message: impl Into<String>, action: PendingAction) {
        self.alert = Some(Alert {
            title: "Confirm".to_string(),
            message: message.into(),
            kind: AlertKind::Confirm(action),
        });
    }

    /// Convert a request failure into an alert; a 401 clears the stored
    /// token and returns to the login screen
    fn handle_error(&mut self, err: ClientError) {
        tracing::warn!(error = %err, "request failed");
        if err.is_unauthorized() {
            if let Err(e) = self.token_store.delete() {
                tracing::warn!(error = %e, "failed to delete stored token");
            }
            self.client.clear_token();
            self.input_mode = InputMode::Normal;
            self.focus = 0;
            self.screen = Screen::Login;
            self.error_alert("Session expired", "Please log in again");
            return;
        }
        self.error_alert("Error", err.to_string());
    }

    // ========== Reads shared with the draw functions ==========

    /// Tax rate as a fraction, from the receipt's tax input with the
    /// configured percentage as fallback
    pub fn tax_rate(&self) -> f64 {
        let percent = self
            .tax_input
            .value()
            .trim()
            .parse::<f64>()
            .unwrap_or(self.config.tax_percent);
        money::percent_to_rate(percent.clamp(0.0, 100.0))
    }

    /// Dishes of the active category tab
    pub fn current_section(&self) -> Option<&MenuSection> {
        self.menu.get(self.category_tab)
    }

    /// All dishes across sections, in section order
    pub fn flat_dishes(&self) -> Vec<DishRow> {
        self.menu
            .iter()
            .flat_map(|section| {
                section.items.iter().map(|dish| DishRow {
                    id: dish.id.clone(),
                    dish_name: dish.dish_name.clone(),
                    price: dish.price,
                    category: section.category_name.clone(),
                })
            })
            .collect()
    }

    /// (list id, category name) pairs across all category lists
    pub fn category_rows(&self) -> Vec<(String, String)> {
        self.categories
            .iter()
            .flat_map(|list| {
                list.categories
                    .iter()
                    .map(|name| (list.id.clone(), name.clone()))
            })
            .collect()
    }

    /// Table number and dish name under the receipt cursor
    fn receipt_line(&self) -> Option<(u32, String)> {
        let (table, cart) = self.cart.selected_cart()?;
        cart.items
            .get(self.receipt_cursor)
            .map(|item| (table, item.dish_name.clone()))
    }

    // ========== Key dispatch ==========

    async fn handle_key(&mut self, key: KeyEvent) {
        if self.alert.is_some() {
            self.handle_alert_key(key).await;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key).await,
            Screen::Signup => self.handle_signup_key(key).await,
            Screen::Tables => self.handle_tables_key(key).await,
            Screen::Menu => self.handle_menu_key(key),
            Screen::Receipt => self.handle_receipt_key(key),
            Screen::Payment => self.handle_payment_key(key).await,
            Screen::Orders => self.handle_orders_key(key).await,
            Screen::OrderDetail => self.handle_detail_key(key).await,
            Screen::AddItems => self.handle_add_items_key(key),
            Screen::MenuAdmin => self.handle_admin_key(key).await,
        }
    }

    async fn handle_alert_key(&mut self, key: KeyEvent) {
        let Some(alert) = self.alert.take() else {
            return;
        };
        if let AlertKind::Confirm(action) = &alert.kind {
            match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    let action = action.clone();
                    self.run_pending(action).await;
                }
                KeyCode::Esc | KeyCode::Char('n') => {}
                _ => self.alert = Some(alert),
            }
            return;
        }
        // any key dismisses info and error alerts
    }

    async fn run_pending(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteOrders => self.delete_selected_orders().await,
            PendingAction::DeleteCategory { list_id, name } => {
                self.is_loading = true;
                let result = self.client.delete_category(&list_id, &name).await;
                self.is_loading = false;
                match result {
                    Ok(()) => {
                        tracing::info!(%name, "category deleted");
                        self.refresh_admin().await;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
            PendingAction::DeleteMenuItem { id } => {
                self.is_loading = true;
                let result = self.client.delete_menu_item(&id).await;
                self.is_loading = false;
                match result {
                    Ok(()) => {
                        tracing::info!(%id, "menu item deleted");
                        self.refresh_admin().await;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
        }
    }

    // ========== Login / Signup ==========

    async fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.focus = 0;
            self.screen = Screen::Signup;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % 2,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + 1) % 2,
            KeyCode::Enter => self.do_login().await,
            _ => {
                let input = match self.focus {
                    0 => &mut self.phone_input,
                    _ => &mut self.password_input,
                };
                input.handle_event(&Event::Key(key));
            }
        }
    }

    async fn do_login(&mut self) {
        let phone = self.phone_input.value().trim().to_string();
        let password = self.password_input.value().to_string();
        if phone.is_empty() || password.is_empty() {
            self.validation_alert("Phone number and password are required");
            return;
        }

        let request = LoginRequest {
            phone_number: phone,
            password,
        };

        self.is_loading = true;
        let result = self.client.login(&request).await;
        self.is_loading = false;

        match result {
            Ok(token) => {
                if let Err(e) = self.token_store.save(&token) {
                    tracing::warn!(error = %e, "failed to persist token");
                }
                self.client.set_token(token);
                self.password_input.reset();
                self.focus = 0;
                self.screen = Screen::Tables;
                tracing::info!("logged in");
            }
            Err(ClientError::Unauthorized) => {
                self.error_alert("Login failed", "Invalid phone number or password");
            }
            Err(err) => self.handle_error(err),
        }
    }

    async fn handle_signup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = 0;
                self.screen = Screen::Login;
            }
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % 5,
            KeyCode::BackTab | KeyCode::Up => self.focus = (self.focus + 4) % 5,
            KeyCode::Enter => self.do_signup().await,
            KeyCode::Left if self.focus == 4 => {
                self.shop_type_index = (self.shop_type_index + SHOP_TYPES.len() - 1) % SHOP_TYPES.len();
            }
            KeyCode::Right if self.focus == 4 => {
                self.shop_type_index = (self.shop_type_index + 1) % SHOP_TYPES.len();
            }
            _ => {
                let input = match self.focus {
                    0 => &mut self.phone_input,
                    1 => &mut self.password_input,
                    2 => &mut self.confirm_input,
                    3 => &mut self.shop_name_input,
                    _ => return,
                };
                input.handle_event(&Event::Key(key));
            }
        }
    }

    async fn do_signup(&mut self) {
        let phone = self.phone_input.value().trim().to_string();
        let password = self.password_input.value().to_string();
        let confirm = self.confirm_input.value().to_string();
        let shop_name = self.shop_name_input.value().trim().to_string();

        if phone.is_empty() || password.is_empty() || confirm.is_empty() || shop_name.is_empty() {
            self.validation_alert("All fields are required");
            return;
        }
        if password != confirm {
            self.validation_alert("Passwords do not match");
            return;
        }

        let request = SignupRequest {
            phone_number: phone,
            password,
            confirm_password: confirm,
            shop_name,
            shop_type: SHOP_TYPES[self.shop_type_index].to_string(),
        };

        self.is_loading = true;
        let result = self.client.signup(&request).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.password_input.reset();
                self.confirm_input.reset();
                self.focus = 0;
                self.screen = Screen::Login;
                self.info_alert("Welcome", "Account created, please log in");
            }
            Err(err) => self.handle_error(err),
        }
    }

    // ========== Tables ==========

    /// Move the grid cursor, clamped to the configured table count
    pub fn move_table_cursor(&mut self, dx: i32, dy: i32) {
        let count = self.config.tables as i32;
        if count == 0 {
            return;
        }
        let next = self.table_cursor as i32 + dx + dy * TABLE_COLS as i32;
        self.table_cursor = next.clamp(0, count - 1) as usize;
    }

    async fn handle_tables_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.move_table_cursor(-1, 0),
            KeyCode::Right => self.move_table_cursor(1, 0),
            KeyCode::Up => self.move_table_cursor(0, -1),
            KeyCode::Down => self.move_table_cursor(0, 1),
            KeyCode::Enter => {
                let table = self.table_cursor as u32 + 1;
                self.cart.select_table(table);
                self.open_menu_screen().await;
            }
            KeyCode::Char('o') => {
                if self.start_date_input.value().is_empty() {
                    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
                    self.start_date_input = Input::new(today.clone());
                    self.end_date_input = Input::new(today);
                }
                self.input_mode = InputMode::Normal;
                self.screen = Screen::Orders;
            }
            KeyCode::Char('m') => self.open_admin().await,
            _ => {}
        }
    }

    // ========== Menu (ordering) ==========

    async fn open_menu_screen(&mut self) {
        self.is_loading = true;
        let result = self.client.fetch_menu().await;
        self.is_loading = false;
        match result {
            Ok(menu) => {
                self.menu = menu;
                self.category_tab = 0;
                self.dish_cursor = 0;
                self.screen = Screen::Menu;
            }
            Err(err) => {
                self.cart.clear_selection();
                self.handle_error(err);
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let section_count = self.menu.len();
        match key.code {
            KeyCode::Esc => {
                self.cart.clear_selection();
                self.screen = Screen::Tables;
            }
            KeyCode::Left if section_count > 0 => {
                self.category_tab = (self.category_tab + section_count - 1) % section_count;
                self.dish_cursor = 0;
            }
            KeyCode::Right if section_count > 0 => {
                self.category_tab = (self.category_tab + 1) % section_count;
                self.dish_cursor = 0;
            }
            KeyCode::Up => self.dish_cursor = self.dish_cursor.saturating_sub(1),
            KeyCode::Down => {
                let len = self.current_section().map(|s| s.items.len()).unwrap_or(0);
                if self.dish_cursor + 1 < len {
                    self.dish_cursor += 1;
                }
            }
            KeyCode::Char('+') | KeyCode::Enter => {
                let Some(table) = self.cart.selected_table() else {
                    return;
                };
                let dish = self
                    .current_section()
                    .and_then(|s| s.items.get(self.dish_cursor))
                    .map(|d| (d.dish_name.clone(), d.price));
                if let Some((name, price)) = dish {
                    self.cart.add_item(table, &name, price);
                }
            }
            KeyCode::Char('-') => {
                let Some(table) = self.cart.selected_table() else {
                    return;
                };
                let name = self
                    .current_section()
                    .and_then(|s| s.items.get(self.dish_cursor))
                    .map(|d| d.dish_name.clone());
                if let Some(name) = name {
                    self.cart.decrement(table, &name);
                }
            }
            KeyCode::Char('r') => {
                if self.tax_input.value().is_empty() {
                    self.tax_input = Input::new(format!("{}", self.config.tax_percent));
                }
                self.receipt_cursor = 0;
                self.input_mode = InputMode::Normal;
                self.screen = Screen::Receipt;
            }
            _ => {}
        }
    }

    // ========== Receipt ==========

    fn handle_receipt_key(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
                _ => Self::push_numeric(&mut self.tax_input, key, 100.0, false),
            }
            return;
        }

        let item_count = self
            .cart
            .selected_cart()
            .map(|(_, c)| c.items.len())
            .unwrap_or(0);

        match key.code {
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Up => self.receipt_cursor = self.receipt_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.receipt_cursor + 1 < item_count {
                    self.receipt_cursor += 1;
                }
            }
            KeyCode::Char('+') => {
                if let Some((table, name)) = self.receipt_line() {
                    self.cart.increment(table, &name);
                }
            }
            KeyCode::Char('-') => {
                if let Some((table, name)) = self.receipt_line() {
                    self.cart.decrement(table, &name);
                    // the line under the cursor may be gone now
                    let len = self
                        .cart
                        .selected_cart()
                        .map(|(_, c)| c.items.len())
                        .unwrap_or(0);
                    self.receipt_cursor = self.receipt_cursor.min(len.saturating_sub(1));
                }
            }
            KeyCode::Char('t') => {
                if let Some((table, cart)) = self.cart.selected_cart() {
                    let next = cart.order_type.toggle();
                    self.cart.set_order_type(table, next);
                }
            }
            KeyCode::Char('e') => self.input_mode = InputMode::Editing,
            KeyCode::Char('p') => {
                let Some((_, cart)) = self.cart.selected_cart() else {
                    return;
                };
                if cart.is_empty() {
                    self.validation_alert("Receipt is empty");
                    return;
                }
                let total = money::final_total(cart.subtotal(), self.tax_rate());
                self.paid_input = Input::new(format!("{}", total));
                self.screen = Screen::Payment;
            }
            _ => {}
        }
    }

    // ========== Payment ==========

    async fn handle_payment_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Receipt,
            KeyCode::Enter => self.submit_payment().await,
            _ => Self::push_numeric(&mut self.paid_input, key, 100_000_000.0, true),
        }
    }

    async fn submit_payment(&mut self) {
        let Some((table, cart)) = self.cart.selected_cart() else {
            return;
        };
        if cart.is_empty() {
            self.validation_alert("Receipt is empty");
            return;
        }
        let Some(paid) = money::parse_amount(self.paid_input.value()) else {
            self.validation_alert("Enter a valid paid amount");
            return;
        };

        let rate = self.tax_rate();
        let subtotal = cart.subtotal();
        let final_total = money::final_total(subtotal, rate);
        let payload = OrderCreate {
            table: table.to_string(),
            tax_rate: rate,
            order_type: cart.order_type,
            payment_type: PaymentType::Cash,
            items: cart.items.clone(),
            subtotal,
            final_total,
            paid_amount: paid,
            change: money::change(paid, final_total),
        };

        self.is_loading = true;
        let result = self.client.create_order(&payload).await;
        self.is_loading = false;

        match result {
            Ok(order) => {
                tracing::info!(id = %order.id, table, total = order.final_total, "order created");
                self.cart.remove_table(table);
                self.paid_input.reset();
                self.tax_input.reset();
                self.screen = Screen::Tables;
                self.info_alert(
                    "Payment complete",
                    format!("Change: {}", money::format_amount(order.change)),
                );
            }
            Err(err) => self.handle_error(err),
        }
    }

    // ========== Orders (history) ==========

    async fn handle_orders_key(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Editing {
            match key.code {
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Tab | KeyCode::BackTab => self.focus = (self.focus + 1) % 2,
                KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                    self.apply_order_range().await;
                }
                _ => {
                    let input = match self.focus {
                        0 => &mut self.start_date_input,
                        _ => &mut self.end_date_input,
                    };
                    input.handle_event(&Event::Key(key));
                }
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.screen = Screen::Tables,
            KeyCode::Char('e') => {
                self.focus = 0;
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Up => self.orders_cursor = self.orders_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.orders_cursor + 1 < self.orders.len() {
                    self.orders_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(order) = self.orders.get(self.orders_cursor) {
                    let id = order.id.clone();
                    if !self.selected_order_ids.remove(&id) {
                        self.selected_order_ids.insert(id);
                    }
                }
            }
            KeyCode::Char('a') => {
                if self.selected_order_ids.len() == self.orders.len() {
                    self.selected_order_ids.clear();
                } else {
                    self.selected_order_ids = self.orders.iter().map(|o| o.id.clone()).collect();
                }
            }
            KeyCode::Char('d') => {
                if self.selected_order_ids.is_empty() {
                    self.validation_alert("No orders selected");
                    return;
                }
                self.confirm_alert(
                    format!("Delete {} order(s)?", self.selected_order_ids.len()),
                    PendingAction::DeleteOrders,
                );
            }
            KeyCode::Enter => {
                if let Some(order) = self.orders.get(self.orders_cursor) {
                    let id = order.id.clone();
                    self.open_order_detail(&id).await;
                }
            }
            _ => {}
        }
    }

    async fn apply_order_range(&mut self) {
        let start = chrono::NaiveDate::parse_from_str(self.start_date_input.value().trim(), "%Y-%m-%d");
        let end = chrono::NaiveDate::parse_from_str(self.end_date_input.value().trim(), "%Y-%m-%d");
        let (Ok(start), Ok(end)) = (start, end) else {
            self.validation_alert("Dates must be YYYY-MM-DD");
            return;
        };

        self.is_loading = true;
        let result = self.client.fetch_orders_in_range(start, end).await;
        self.is_loading = false;

        match result {
            Ok(orders) => {
                self.orders = orders;
                self.orders_loaded = true;
                self.orders_cursor = 0;
                self.selected_order_ids.clear();
            }
            // an empty range renders inline, not as a modal
            Err(ClientError::NotFound(_)) => {
                self.orders.clear();
                self.orders_loaded = true;
                self.selected_order_ids.clear();
            }
            Err(err) => self.handle_error(err),
        }
    }

    async fn delete_selected_orders(&mut self) {
        let ids: Vec<String> = self.selected_order_ids.iter().cloned().collect();
        self.is_loading = true;
        let result = self.client.delete_orders(ids.clone()).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                tracing::info!(count = ids.len(), "orders deleted");
                self.orders.retain(|o| !self.selected_order_ids.contains(&o.id));
                self.selected_order_ids.clear();
                self.orders_cursor = self.orders_cursor.min(self.orders.len().saturating_sub(1));
            }
            Err(err) => self.handle_error(err),
        }
    }

    // ========== Order detail ==========

    async fn open_order_detail(&mut self, id: &str) {
        self.is_loading = true;
        let result = self.client.fetch_order(id).await;
        self.is_loading = false;

        match result {
            Ok(order) => {
                self.editor.set_current(order);
                self.detail_missing = false;
                self.detail_cursor = 0;
                self.screen = Screen::OrderDetail;
            }
            // missing orders render inline on the detail screen
            Err(ClientError::NotFound(_)) => {
                self.editor.clear();
                self.detail_missing = true;
                self.screen = Screen::OrderDetail;
            }
            Err(err) => self.handle_error(err),
        }
    }

    async fn handle_detail_key(&mut self, key: KeyEvent) {
        let item_count = self.editor.order().map(|o| o.items.len()).unwrap_or(0);
        match key.code {
            KeyCode::Esc => {
                self.editor.clear();
                self.screen = Screen::Orders;
            }
            KeyCode::Up => self.detail_cursor = self.detail_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.detail_cursor + 1 < item_count {
                    self.detail_cursor += 1;
                }
            }
            KeyCode::Char('+') => {
                let name = self
                    .editor
                    .order()
                    .and_then(|o| o.items.get(self.detail_cursor))
                    .map(|i| i.dish_name.clone());
                if let Some(name) = name {
                    self.editor.increment_item(&name);
                }
            }
            KeyCode::Char('-') => {
                let name = self
                    .editor
                    .order()
                    .and_then(|o| o.items.get(self.detail_cursor))
                    .map(|i| i.dish_name.clone());
                if let Some(name) = name {
                    self.editor.decrement_item(&name);
                    let len = self.editor.order().map(|o| o.items.len()).unwrap_or(0);
                    self.detail_cursor = self.detail_cursor.min(len.saturating_sub(1));
                }
            }
            KeyCode::Char('a') => {
                if self.editor.order().is_none() {
                    return;
                }
                self.is_loading = true;
                let result = self.client.fetch_menu().await;
                self.is_loading = false;
                match result {
                    Ok(menu) => {
                        self.menu = menu;
                        self.add_items_cursor = 0;
                        self.screen = Screen::AddItems;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
            KeyCode::Char('s') => self.save_order().await,
            _ => {}
        }
    }

    async fn save_order(&mut self) {
        if !self.editor.is_dirty() {
            return;
        }
        let Some(order) = self.editor.order() else {
            return;
        };
        let id = order.id.clone();
        let Some(payload) = self.editor.update_payload() else {
            return;
        };

        self.is_loading = true;
        let result = self.client.update_order(&id, &payload).await;
        self.is_loading = false;

        match result {
            Ok(updated) => {
                tracing::info!(%id, total = updated.final_total, "order updated");
                // the fresh copy also clears the dirty flag
                self.editor.set_current(updated);
                self.info_alert("Saved", "Order updated");
            }
            Err(err) => self.handle_error(err),
        }
    }

    // ========== Add items ==========

    fn handle_add_items_key(&mut self, key: KeyEvent) {
        let dishes = self.flat_dishes();
        match key.code {
            KeyCode::Esc => self.screen = Screen::OrderDetail,
            KeyCode::Up => self.add_items_cursor = self.add_items_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.add_items_cursor + 1 < dishes.len() {
                    self.add_items_cursor += 1;
                }
            }
            KeyCode::Char('+') | KeyCode::Enter => {
                if let Some(dish) = dishes.get(self.add_items_cursor) {
                    self.editor.add_item(&dish.dish_name, dish.price, 1);
                }
            }
            KeyCode::Char('-') => {
                if let Some(dish) = dishes.get(self.add_items_cursor) {
                    self.editor.add_item(&dish.dish_name, dish.price, -1);
                }
            }
            _ => {}
        }
    }

    // ========== Menu management ==========

    async fn open_admin(&mut self) {
        self.is_loading = true;
        let menu = self.client.fetch_menu().await;
        let categories = match &menu {
            Ok(_) => self.client.fetch_categories().await,
            Err(_) => Ok(Vec::new()),
        };
        self.is_loading = false;

        match (menu, categories) {
            (Ok(menu), Ok(categories)) => {
                self.menu = menu;
                self.categories = categories;
                self.admin_pane = AdminPane::Categories;
                self.admin_category_cursor = 0;
                self.admin_dish_cursor = 0;
                self.admin_form = AdminForm::None;
                self.screen = Screen::MenuAdmin;
            }
            (Err(err), _) | (_, Err(err)) => self.handle_error(err),
        }
    }

    /// Refetch menu and categories after an admin mutation
    async fn refresh_admin(&mut self) {
        self.is_loading = true;
        let menu = self.client.fetch_menu().await;
        let categories = self.client.fetch_categories().await;
        self.is_loading = false;

        match (menu, categories) {
            (Ok(menu), Ok(categories)) => {
                self.menu = menu;
                self.categories = categories;
                let cat_count = self.category_rows().len();
                self.admin_category_cursor =
                    self.admin_category_cursor.min(cat_count.saturating_sub(1));
                let dish_count = self.flat_dishes().len();
                self.admin_dish_cursor = self.admin_dish_cursor.min(dish_count.saturating_sub(1));
            }
            (Err(err), _) | (_, Err(err)) => self.handle_error(err),
        }
    }

    async fn handle_admin_key(&mut self, key: KeyEvent) {
        if self.admin_form != AdminForm::None {
            self.handle_admin_form_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Esc => self.screen = Screen::Tables,
            KeyCode::Tab | KeyCode::BackTab => {
                self.admin_pane = match self.admin_pane {
                    AdminPane::Categories => AdminPane::Dishes,
                    AdminPane::Dishes => AdminPane::Categories,
                };
            }
            KeyCode::Up => match self.admin_pane {
                AdminPane::Categories => {
                    self.admin_category_cursor = self.admin_category_cursor.saturating_sub(1)
                }
                AdminPane::Dishes => {
                    self.admin_dish_cursor = self.admin_dish_cursor.saturating_sub(1)
                }
            },
            KeyCode::Down => match self.admin_pane {
                AdminPane::Categories => {
                    if self.admin_category_cursor + 1 < self.category_rows().len() {
                        self.admin_category_cursor += 1;
                    }
                }
                AdminPane::Dishes => {
                    if self.admin_dish_cursor + 1 < self.flat_dishes().len() {
                        self.admin_dish_cursor += 1;
                    }
                }
            },
            KeyCode::Char('n') => match self.admin_pane {
                AdminPane::Categories => {
                    self.name_input.reset();
                    self.focus = 0;
                    self.admin_form = AdminForm::AddCategory;
                }
                AdminPane::Dishes => {
                    let category = self
                        .category_rows()
                        .get(self.admin_category_cursor)
                        .map(|(_, name)| name.clone())
                        .unwrap_or_default();
                    self.category_input = Input::new(category);
                    self.name_input.reset();
                    self.price_input.reset();
                    self.focus = 0;
                    self.admin_form = AdminForm::AddDish;
                }
            },
            KeyCode::Char('e') if self.admin_pane == AdminPane::Dishes => {
                if let Some(dish) = self.flat_dishes().get(self.admin_dish_cursor).cloned() {
                    self.name_input = Input::new(dish.dish_name);
                    self.price_input = Input::new(format!("{}", dish.price));
                    self.focus = 0;
                    self.admin_form = AdminForm::EditDish { id: dish.id };
                }
            }
            KeyCode::Char('d') => match self.admin_pane {
                AdminPane::Categories => {
                    if let Some((list_id, name)) =
                        self.category_rows().get(self.admin_category_cursor).cloned()
                    {
                        self.confirm_alert(
                            format!("Delete category '{}'?", name),
                            PendingAction::DeleteCategory { list_id, name },
                        );
                    }
                }
                AdminPane::Dishes => {
                    if let Some(dish) = self.flat_dishes().get(self.admin_dish_cursor).cloned() {
                        self.confirm_alert(
                            format!("Delete dish '{}'?", dish.dish_name),
                            PendingAction::DeleteMenuItem { id: dish.id },
                        );
                    }
                }
            },
            _ => {}
        }
    }

    async fn handle_admin_form_key(&mut self, key: KeyEvent) {
        let field_count = match self.admin_form {
            AdminForm::AddCategory => 1,
            AdminForm::AddDish => 3,
            AdminForm::EditDish { .. } => 2,
            AdminForm::None => return,
        };

        match key.code {
            KeyCode::Esc => self.admin_form = AdminForm::None,
            KeyCode::Tab => self.focus = (self.focus + 1) % field_count,
            KeyCode::BackTab => self.focus = (self.focus + field_count - 1) % field_count,
            KeyCode::Enter => self.submit_admin_form().await,
            _ => match (&self.admin_form, self.focus) {
                (AdminForm::AddCategory, 0) => {
                    self.name_input.handle_event(&Event::Key(key));
                }
                (AdminForm::AddDish, 0) => {
                    self.category_input.handle_event(&Event::Key(key));
                }
                (AdminForm::AddDish, 1) | (AdminForm::EditDish { .. }, 0) => {
                    self.name_input.handle_event(&Event::Key(key));
                }
                (AdminForm::AddDish, 2) | (AdminForm::EditDish { .. }, 1) => {
                    Self::push_numeric(&mut self.price_input, key, 100_000_000.0, true);
                }
                _ => {}
            },
        }
    }

    async fn submit_admin_form(&mut self) {
        match self.admin_form.clone() {
            AdminForm::None => {}
            AdminForm::AddCategory => {
                let name = self.name_input.value().trim().to_string();
                if name.is_empty() {
                    self.validation_alert("Category name is required");
                    return;
                }

                self.is_loading = true;
                // first category creates the list document, later ones append
                let result = match self.categories.first().map(|l| l.id.clone()) {
                    Some(list_id) => self.client.push_category(&list_id, &name).await,
                    None => self.client.add_category(&name).await,
                };
                self.is_loading = false;

                match result {
                    Ok(()) => {
                        tracing::info!(%name, "category added");
                        self.admin_form = AdminForm::None;
                        self.refresh_admin().await;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
            AdminForm::AddDish => {
                let category = self.category_input.value().trim().to_string();
                let name = self.name_input.value().trim().to_string();
                let price = money::parse_amount(self.price_input.value());
                if category.is_empty() || name.is_empty() {
                    self.validation_alert("Category and dish name are required");
                    return;
                }
                let Some(price) = price else {
                    self.validation_alert("Enter a valid price");
                    return;
                };

                let item = MenuItemCreate {
                    category_name: category,
                    dish_name: name,
                    price,
                };
                self.is_loading = true;
                let result = self.client.add_menu_item(&item).await;
                self.is_loading = false;

                match result {
                    Ok(()) => {
                        tracing::info!(dish = %item.dish_name, "menu item added");
                        self.admin_form = AdminForm::None;
                        self.refresh_admin().await;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
            AdminForm::EditDish { id } => {
                let name = self.name_input.value().trim().to_string();
                let price = money::parse_amount(self.price_input.value());
                if name.is_empty() {
                    self.validation_alert("Dish name is required");
                    return;
                }
                let Some(price) = price else {
                    self.validation_alert("Enter a valid price");
                    return;
                };

                let item = MenuItemUpdate {
                    dish_name: name,
                    price,
                };
                self.is_loading = true;
                let result = self.client.update_menu_item(&id, &item).await;
                self.is_loading = false;

                match result {
                    Ok(()) => {
                        tracing::info!(%id, "menu item updated");
                        self.admin_form = AdminForm::None;
                        self.refresh_admin().await;
                    }
                    Err(err) => self.handle_error(err),
                }
            }
        }
    }

    // ========== Numeric input filter ==========

    /// Route a key into a numeric input, refusing characters that would
    /// not parse or would exceed `max`
    fn push_numeric(input: &mut Input, key: KeyEvent, max: f64, allow_dot: bool) {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || (allow_dot && c == '.') => {
                let candidate = format!("{}{}", input.value(), c);
                if candidate.parse::<f64>().map(|v| v <= max).unwrap_or(false) {
                    input.handle_event(&Event::Key(key));
                }
            }
            KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => {
                input.handle_event(&Event::Key(key));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reef_client::ClientConfig;
    use shared::models::Dish;

    fn create_test_app() -> App {
        let config = AppConfig::with_overrides("http://localhost:4000", "/tmp/reef-pos-test");
        let client = ClientConfig::new(&config.api_url).build_http_client();
        let token_store = TokenStore::new(&config.work_dir);
        App::new(config, client, token_store)
    }

    fn test_section(category: &str, dishes: &[(&str, f64)]) -> MenuSection {
        MenuSection {
            id: format!("sec-{}", category),
            category_name: category.to_string(),
            items: dishes
                .iter()
                .map(|(name, price)| Dish {
                    id: format!("dish-{}", name),
                    dish_name: name.to_string(),
                    price: *price,
                    description: None,
                    image: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_starts_on_login_without_token() {
        let app = create_test_app();
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn test_starts_on_tables_with_token() {
        let config = AppConfig::with_overrides("http://localhost:4000", "/tmp/reef-pos-test");
        let client = ClientConfig::new(&config.api_url)
            .with_token("jwt-abc")
            .build_http_client();
        let token_store = TokenStore::new(&config.work_dir);
        let app = App::new(config, client, token_store);
        assert_eq!(app.screen, Screen::Tables);
    }

    #[test]
    fn test_tax_rate_falls_back_to_config_default() {
        let app = create_test_app();
        // empty input, config default is 5%
        assert_eq!(app.tax_rate(), 0.05);
    }

    #[test]
    fn test_tax_rate_reads_input_and_clamps() {
        let mut app = create_test_app();
        app.tax_input = Input::new("10".to_string());
        assert_eq!(app.tax_rate(), 0.1);

        app.tax_input = Input::new("250".to_string());
        assert_eq!(app.tax_rate(), 1.0);
    }

    #[test]
    fn test_table_cursor_stays_on_grid() {
        let mut app = create_test_app();
        assert_eq!(app.config.tables, 12);

        app.move_table_cursor(-1, 0);
        assert_eq!(app.table_cursor, 0);

        app.move_table_cursor(0, 1);
        assert_eq!(app.table_cursor, TABLE_COLS);

        for _ in 0..20 {
            app.move_table_cursor(0, 1);
        }
        assert_eq!(app.table_cursor, 11);
    }

    #[test]
    fn test_flat_dishes_preserves_section_order() {
        let mut app = create_test_app();
        app.menu = vec![
            test_section("Mains", &[("Burger", 4000.0), ("Fries", 3000.0)]),
            test_section("Drinks", &[("Cola", 1500.0)]),
        ];

        let dishes = app.flat_dishes();
        assert_eq!(dishes.len(), 3);
        assert_eq!(dishes[0].dish_name, "Burger");
        assert_eq!(dishes[0].category, "Mains");
        assert_eq!(dishes[2].dish_name, "Cola");
        assert_eq!(dishes[2].category, "Drinks");
    }

    #[test]
    fn test_category_rows_flatten_lists() {
        let mut app = create_test_app();
        app.categories = vec![CategoryList {
            id: "list-1".to_string(),
            categories: vec!["Mains".to_string(), "Drinks".to_string()],
        }];

        let rows = app.category_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("list-1".to_string(), "Mains".to_string()));
        assert_eq!(rows[1], ("list-1".to_string(), "Drinks".to_string()));
    }

    #[test]
    fn test_push_numeric_filters_input() {
        fn press(input: &mut Input, c: char) {
            App::push_numeric(
                input,
                KeyEvent::from(KeyCode::Char(c)),
                100.0,
                false,
            );
        }

        let mut input = Input::default();
        press(&mut input, '5');
        press(&mut input, 'x');
        press(&mut input, '0');
        assert_eq!(input.value(), "50");

        // another digit would exceed the cap
        press(&mut input, '0');
        assert_eq!(input.value(), "50");

        // dot refused when not allowed
        press(&mut input, '.');
        assert_eq!(input.value(), "50");
    }
}
