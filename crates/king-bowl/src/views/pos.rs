//! The POS draft ticket. Lives only on the POS screen until it is submitted.

use crate::model::{MenuItem, MenuItemId, OrderCreate, OrderLine, OrderType, StaffSession};
use crate::order_actor::OrderError;
use crate::pricing::{Bill, Pricing};

#[derive(Debug, Clone, PartialEq)]
pub struct PosLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosTicket {
    order_type: OrderType,
    table_number: Option<u8>,
    lines: Vec<PosLine>,
}

impl Default for PosTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl PosTicket {
    /// An empty dine-in ticket with no table chosen.
    pub fn new() -> Self {
        Self {
            order_type: OrderType::DineIn,
            table_number: None,
            lines: Vec::new(),
        }
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn table_number(&self) -> Option<u8> {
        self.table_number
    }

    pub fn lines(&self) -> &[PosLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Tapping a dish adds one; tapping it again bumps the quantity.
    pub fn add_item(&mut self, item: &MenuItem) {
        match self.line_mut(item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(PosLine {
                menu_item_id: item.id,
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
                notes: String::new(),
            }),
        }
    }

    /// 0 removes the line.
    pub fn set_quantity(&mut self, menu_item_id: MenuItemId, quantity: u32) {
        if quantity == 0 {
            self.remove(menu_item_id);
        } else if let Some(line) = self.line_mut(menu_item_id) {
            line.quantity = quantity;
        }
    }

    pub fn set_notes(&mut self, menu_item_id: MenuItemId, notes: impl Into<String>) {
        if let Some(line) = self.line_mut(menu_item_id) {
            line.notes = notes.into();
        }
    }

    pub fn remove(&mut self, menu_item_id: MenuItemId) {
        self.lines.retain(|line| line.menu_item_id != menu_item_id);
    }

    /// Empties the ticket. Type and table stay as chosen.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Switching to takeaway forgets the table.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
        if order_type == OrderType::Takeaway {
            self.table_number = None;
        }
    }

    pub fn set_table(&mut self, table_number: Option<u8>) {
        self.table_number = table_number;
    }

    pub fn bill(&self, pricing: &Pricing) -> Bill {
        pricing.bill(
            self.lines
                .iter()
                .map(|line| (line.unit_price, line.quantity)),
        )
    }

    /// The create request for this ticket, attributed to whoever is logged in.
    pub fn submit(&self, session: &StaffSession) -> Result<OrderCreate, OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if self.order_type == OrderType::DineIn && self.table_number.is_none() {
            return Err(OrderError::MissingTable);
        }
        Ok(OrderCreate {
            order_type: self.order_type,
            table_number: match self.order_type {
                OrderType::DineIn => self.table_number,
                OrderType::Takeaway => None,
            },
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                    notes: line.notes.trim().to_string(),
                })
                .collect(),
            created_by: session.name.clone(),
        })
    }

    fn line_mut(&mut self, menu_item_id: MenuItemId) -> Option<&mut PosLine> {
        self.lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{StaffId, StaffRole};
    use chrono::Utc;

    fn cashier() -> StaffSession {
        StaffSession {
            staff_id: StaffId(2),
            name: "Priya Sharma".to_string(),
            role: StaffRole::Cashier,
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_increments_existing_line() {
        let catalog = Catalog::standard();
        let dish = catalog.get(MenuItemId(1)).unwrap();

        let mut ticket = PosTicket::new();
        ticket.add_item(dish);
        ticket.add_item(dish);
        assert_eq!(ticket.lines().len(), 1);
        assert_eq!(ticket.item_count(), 2);

        let bill = ticket.bill(&Pricing::default());
        assert_eq!(bill.subtotal, dish.price * 2.0);
    }

    #[test]
    fn test_submit_rejects_empty_and_tableless_dine_in() {
        let catalog = Catalog::standard();
        let mut ticket = PosTicket::new();
        assert_eq!(ticket.submit(&cashier()), Err(OrderError::EmptyOrder));

        ticket.add_item(catalog.get(MenuItemId(3)).unwrap());
        assert_eq!(ticket.submit(&cashier()), Err(OrderError::MissingTable));

        ticket.set_table(Some(4));
        ticket.set_notes(MenuItemId(3), " no onions ");
        let create = ticket.submit(&cashier()).unwrap();
        assert_eq!(create.table_number, Some(4));
        assert_eq!(create.created_by, "Priya Sharma");
        assert_eq!(create.items[0].notes, "no onions");
    }

    #[test]
    fn test_takeaway_drops_table() {
        let catalog = Catalog::standard();
        let mut ticket = PosTicket::new();
        ticket.set_table(Some(7));
        ticket.add_item(catalog.get(MenuItemId(5)).unwrap());
        ticket.set_order_type(OrderType::Takeaway);

        let create = ticket.submit(&cashier()).unwrap();
        assert_eq!(create.order_type, OrderType::Takeaway);
        assert_eq!(create.table_number, None);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let catalog = Catalog::standard();
        let mut ticket = PosTicket::new();
        ticket.add_item(catalog.get(MenuItemId(1)).unwrap());
        ticket.add_item(catalog.get(MenuItemId(2)).unwrap());

        ticket.set_quantity(MenuItemId(1), 0);
        assert_eq!(ticket.lines().len(), 1);
        assert_eq!(ticket.lines()[0].menu_item_id, MenuItemId(2));
    }
}
