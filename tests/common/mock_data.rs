//! Mock data builders for work orders, pages and console state.
//!
//! Tests build records in memory instead of talking to a backend.

use std::time::Duration;

use jiff::civil::{Date, date};
use jiff::tz::TimeZone;
use serde_json::{Value, json};

use shopfloor::console::{ConsoleOptions, ConsoleState};
use shopfloor::session::SessionUser;
use shopfloor::types::{
    Operator, OperatorRef, Pagination, Role, WorkOrder, WorkOrderPage, WorkOrderStatus,
};

/// Builder for creating test work orders
pub struct WorkOrderBuilder {
    order: WorkOrder,
}

impl WorkOrderBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            order: WorkOrder {
                id,
                work_order_number: format!("WO-20240501-{id:03}"),
                product_name: "Bracket".to_string(),
                quantity: 0,
                target_quantity: 100,
                production_deadline: "2024-05-15T00:00:00Z"
                    .parse()
                    .expect("test timestamp should be valid"),
                status: WorkOrderStatus::Pending,
                operator: OperatorRef {
                    id: 7,
                    username: "budi".to_string(),
                },
                production_manager: None,
            },
        }
    }

    pub fn product(mut self, name: &str) -> Self {
        self.order.product_name = name.to_string();
        self
    }

    pub fn status(mut self, status: WorkOrderStatus) -> Self {
        self.order.status = status;
        self
    }

    pub fn quantity(mut self, quantity: u32, target: u32) -> Self {
        self.order.quantity = quantity;
        self.order.target_quantity = target;
        self
    }

    /// Deadline at UTC midnight of `day`
    pub fn deadline(mut self, day: &str) -> Self {
        self.order.production_deadline = format!("{day}T00:00:00Z")
            .parse()
            .expect("test deadline should be valid");
        self
    }

    pub fn operator(mut self, id: u64, username: &str) -> Self {
        self.order.operator = OperatorRef {
            id,
            username: username.to_string(),
        };
        self
    }

    pub fn build(self) -> WorkOrder {
        self.order
    }
}

/// Create a simple pending work order
pub fn mock_work_order(id: u64) -> WorkOrder {
    WorkOrderBuilder::new(id).build()
}

/// Create `count` work orders with ids starting at `first`
pub fn mock_work_orders(first: u64, count: u64) -> Vec<WorkOrder> {
    (first..first + count).map(mock_work_order).collect()
}

/// Wrap records as page `page` of `pages` holding `total` records overall
pub fn mock_page(records: Vec<WorkOrder>, page: u32, pages: u32, total: u64) -> WorkOrderPage {
    WorkOrderPage {
        records,
        pagination: Pagination {
            total,
            page,
            limit: 10,
            pages,
        },
    }
}

pub fn mock_operators() -> Vec<Operator> {
    vec![
        Operator {
            id: 7,
            username: "budi".to_string(),
        },
        Operator {
            id: 8,
            username: "sari".to_string(),
        },
        Operator {
            id: 9,
            username: "agus".to_string(),
        },
    ]
}

pub fn manager() -> SessionUser {
    SessionUser {
        id: 1,
        username: "maria".to_string(),
        role: Role::ProductionManager,
    }
}

pub fn operator() -> SessionUser {
    SessionUser {
        id: 7,
        username: "budi".to_string(),
        role: Role::Operator,
    }
}

pub const TODAY: Date = date(2024, 5, 10);

pub fn console_options() -> ConsoleOptions {
    ConsoleOptions {
        page_size: 10,
        search_debounce: Duration::from_millis(400),
        toast_ttl: Duration::from_secs(5),
        today: TODAY,
        time_zone: TimeZone::UTC,
    }
}

pub fn console_state(user: SessionUser) -> ConsoleState {
    ConsoleState::new(user, console_options())
}

/// JSON body for a work order as the backend sends it
pub fn work_order_json(id: u64, status: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "work_order_number": format!("WO-20240501-{id:03}"),
        "product_name": "Bracket",
        "quantity": quantity,
        "target_quantity": 100,
        "production_deadline": "2024-05-15T00:00:00Z",
        "status": status,
        "operator": { "id": 7, "username": "budi" },
    })
}

/// JSON body of a list response
pub fn page_json(records: Vec<Value>, page: u32, pages: u32, total: u64) -> Value {
    json!({
        "work_orders": records,
        "pagination": { "total": total, "page": page, "limit": 10, "pages": pages },
    })
}
