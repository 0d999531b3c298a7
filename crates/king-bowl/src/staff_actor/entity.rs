//! [`ActorEntity`] implementation for [`StaffMember`].

use super::{StaffAction, StaffError};
use crate::model::{StaffCreate, StaffId, StaffMember};
use crate::validation::is_valid_pin;
use async_trait::async_trait;
use kcb_framework::ActorEntity;

#[async_trait]
impl ActorEntity for StaffMember {
    type Id = StaffId;
    type Create = StaffCreate;
    type Update = ();
    type Action = StaffAction;
    type ActionResult = ();
    type Context = ();
    type Error = StaffError;

    fn id(&self) -> &StaffId {
        &self.id
    }

    fn from_create_params(id: StaffId, params: StaffCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(StaffError::MissingName);
        }
        if !is_valid_pin(&params.pin) {
            return Err(StaffError::MalformedPin);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            role: params.role,
            pin: params.pin,
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: StaffAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {
            StaffAction::ChangePin { current, new } => {
                if current != self.pin {
                    return Err(StaffError::InvalidPin);
                }
                if !is_valid_pin(&new) {
                    return Err(StaffError::MalformedPin);
                }
                self.pin = new;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StaffRole;

    #[test]
    fn test_create_checks_name_and_pin() {
        let ok = StaffMember::from_create_params(
            StaffId(1),
            StaffCreate::new(" Wong Li ", StaffRole::Chef, "3456"),
        )
        .unwrap();
        assert_eq!(ok.name, "Wong Li");

        let no_name =
            StaffMember::from_create_params(StaffId(2), StaffCreate::new("", StaffRole::Chef, "3456"));
        assert_eq!(no_name.unwrap_err(), StaffError::MissingName);

        let bad_pin = StaffMember::from_create_params(
            StaffId(3),
            StaffCreate::new("Amit", StaffRole::Waiter, "45678"),
        );
        assert_eq!(bad_pin.unwrap_err(), StaffError::MalformedPin);
    }

    #[tokio::test]
    async fn test_change_pin_requires_current() {
        let mut member = StaffMember::from_create_params(
            StaffId(1),
            StaffCreate::new("Rajesh", StaffRole::Manager, "1234"),
        )
        .unwrap();

        let wrong = member
            .handle_action(
                StaffAction::ChangePin {
                    current: "0000".into(),
                    new: "9999".into(),
                },
                &(),
            )
            .await;
        assert_eq!(wrong, Err(StaffError::InvalidPin));

        member
            .handle_action(
                StaffAction::ChangePin {
                    current: "1234".into(),
                    new: "9999".into(),
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(member.pin, "9999");
    }
}
