//! The cart reducer and its [`ActorEntity`] implementation.

use super::{CartAction, CartContext, CartError};
use crate::catalog::Catalog;
use crate::model::{Cart, CartCreate, CartId, CartItem, CartSummary, MenuItemId};
use async_trait::async_trait;
use chrono::Utc;
use kcb_framework::ActorEntity;

/// Most portions of one dish a single cart line may hold.
pub const MAX_QUANTITY: u32 = 99;

fn check_quantity(quantity: u32) -> Result<(), CartError> {
    if quantity > MAX_QUANTITY {
        return Err(CartError::QuantityTooLarge {
            requested: quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

impl Cart {
    /// Applies one reducer action. On error the cart is left unchanged.
    pub fn apply(&mut self, action: CartAction, catalog: &Catalog) -> Result<(), CartError> {
        match action {
            CartAction::AddItem {
                menu_item_id,
                quantity,
                spice_level,
                instructions,
            } => {
                if quantity == 0 {
                    return Err(CartError::ZeroQuantity);
                }
                let dish = catalog
                    .get(menu_item_id)
                    .ok_or(CartError::UnknownMenuItem(menu_item_id))?;

                match self
                    .items
                    .iter_mut()
                    .find(|line| line.menu_item_id == menu_item_id)
                {
                    Some(line) => {
                        let quantity = line.quantity.saturating_add(quantity);
                        check_quantity(quantity)?;
                        line.quantity = quantity;
                    }
                    None => {
                        check_quantity(quantity)?;
                        self.items.push(CartItem {
                            menu_item_id,
                            name: dish.name.clone(),
                            unit_price: dish.price,
                            quantity,
                            spice_level: spice_level.unwrap_or(dish.spice_level),
                            instructions: instructions.trim().to_string(),
                        });
                    }
                }
            }
            CartAction::SetQuantity {
                menu_item_id,
                quantity: 0,
            } => self.remove_line(menu_item_id)?,
            CartAction::SetQuantity {
                menu_item_id,
                quantity,
            } => {
                check_quantity(quantity)?;
                self.line_mut(menu_item_id)?.quantity = quantity;
            }
            CartAction::SetInstructions {
                menu_item_id,
                instructions,
            } => {
                self.line_mut(menu_item_id)?.instructions = instructions.trim().to_string();
            }
            CartAction::SetSpiceLevel {
                menu_item_id,
                spice_level,
            } => {
                self.line_mut(menu_item_id)?.spice_level = spice_level;
            }
            CartAction::RemoveItem { menu_item_id } => self.remove_line(menu_item_id)?,
            CartAction::Clear => self.items.clear(),
            CartAction::Settle { lines } => self.settle(&lines),
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn settle(&mut self, billed: &[(MenuItemId, u32)]) {
        for &(menu_item_id, quantity) in billed {
            if let Some(line) = self
                .items
                .iter_mut()
                .find(|line| line.menu_item_id == menu_item_id)
            {
                line.quantity = line.quantity.saturating_sub(quantity);
            }
        }
        self.items.retain(|line| line.quantity > 0);
    }

    fn line_mut(&mut self, menu_item_id: MenuItemId) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
            .ok_or(CartError::NotInCart(menu_item_id))
    }

    fn remove_line(&mut self, menu_item_id: MenuItemId) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|line| line.menu_item_id != menu_item_id);
        if self.items.len() == before {
            return Err(CartError::NotInCart(menu_item_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartSummary;
    type Context = CartContext;
    type Error = CartError;

    fn id(&self) -> &CartId {
        &self.id
    }

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id, params.session))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartSummary, Self::Error> {
        self.apply(action, &ctx.catalog)?;
        Ok(self.summary(&ctx.pricing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpiceLevel;
    use crate::pricing::Pricing;

    const SPRING_ROLLS: MenuItemId = MenuItemId(1);
    const CHILLI_PANEER: MenuItemId = MenuItemId(2);

    fn cart() -> Cart {
        Cart::new(CartId(1), None)
    }

    #[test]
    fn test_add_copies_menu_data_and_default_spice() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(CHILLI_PANEER, 2), &catalog).unwrap();

        let line = cart.line(CHILLI_PANEER).unwrap();
        assert_eq!(line.name, "Chilli Paneer");
        assert_eq!(line.unit_price, 260.0);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.spice_level, SpiceLevel::Hot);
    }

    #[test]
    fn test_adding_existing_dish_increments_quantity() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(
            CartAction::AddItem {
                menu_item_id: SPRING_ROLLS,
                quantity: 1,
                spice_level: Some(SpiceLevel::Medium),
                instructions: "extra dip".to_string(),
            },
            &catalog,
        )
        .unwrap();
        cart.apply(CartAction::add(SPRING_ROLLS, 2), &catalog).unwrap();

        assert_eq!(cart.items.len(), 1);
        let line = cart.line(SPRING_ROLLS).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.spice_level, SpiceLevel::Medium);
        assert_eq!(line.instructions, "extra dip");
    }

    #[test]
    fn test_rejects_unknown_dish_and_zero_quantity() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        assert_eq!(
            cart.apply(CartAction::add(MenuItemId(404), 1), &catalog),
            Err(CartError::UnknownMenuItem(MenuItemId(404)))
        );
        assert_eq!(
            cart.apply(CartAction::add(SPRING_ROLLS, 0), &catalog),
            Err(CartError::ZeroQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(SPRING_ROLLS, 2), &catalog).unwrap();
        cart.apply(CartAction::add(CHILLI_PANEER, 1), &catalog).unwrap();

        cart.apply(
            CartAction::SetQuantity {
                menu_item_id: SPRING_ROLLS,
                quantity: 0,
            },
            &catalog,
        )
        .unwrap();
        assert!(cart.line(SPRING_ROLLS).is_none());
        assert_eq!(cart.items.len(), 1);

        let missing = cart.apply(CartAction::RemoveItem { menu_item_id: SPRING_ROLLS }, &catalog);
        assert_eq!(missing, Err(CartError::NotInCart(SPRING_ROLLS)));
    }

    #[test]
    fn test_quantity_limit() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(SPRING_ROLLS, MAX_QUANTITY), &catalog).unwrap();
        let err = cart.apply(CartAction::add(SPRING_ROLLS, 1), &catalog).unwrap_err();
        assert_eq!(
            err,
            CartError::QuantityTooLarge {
                requested: 100,
                max: MAX_QUANTITY
            }
        );
        assert_eq!(cart.line(SPRING_ROLLS).unwrap().quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_instructions_and_spice_edits() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(CHILLI_PANEER, 1), &catalog).unwrap();
        cart.apply(
            CartAction::SetInstructions {
                menu_item_id: CHILLI_PANEER,
                instructions: "  no onion ".to_string(),
            },
            &catalog,
        )
        .unwrap();
        cart.apply(
            CartAction::SetSpiceLevel {
                menu_item_id: CHILLI_PANEER,
                spice_level: SpiceLevel::Mild,
            },
            &catalog,
        )
        .unwrap();

        let line = cart.line(CHILLI_PANEER).unwrap();
        assert_eq!(line.instructions, "no onion");
        assert_eq!(line.spice_level, SpiceLevel::Mild);
    }

    #[test]
    fn test_summary_totals() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(SPRING_ROLLS, 2), &catalog).unwrap();
        cart.apply(CartAction::add(CHILLI_PANEER, 1), &catalog).unwrap();

        let summary = cart.summary(&Pricing::default());
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.bill.subtotal, 620.0);
        assert_eq!(summary.bill.tax, 31.0);
        assert_eq!(summary.bill.total, 651.0);

        cart.apply(CartAction::Clear, &catalog).unwrap();
        assert_eq!(cart.summary(&Pricing::default()).bill.total, 0.0);
    }

    #[test]
    fn test_settle_removes_only_billed_portions() {
        let catalog = Catalog::standard();
        let mut cart = cart();
        cart.apply(CartAction::add(SPRING_ROLLS, 3), &catalog).unwrap();
        cart.apply(CartAction::add(CHILLI_PANEER, 1), &catalog).unwrap();

        cart.apply(
            CartAction::Settle {
                lines: vec![(SPRING_ROLLS, 2), (CHILLI_PANEER, 1), (MenuItemId(5), 4)],
            },
            &catalog,
        )
        .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.line(SPRING_ROLLS).unwrap().quantity, 1);
        assert!(cart.line(CHILLI_PANEER).is_none());
    }
}
