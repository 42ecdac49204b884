//! Declarative configuration of transitions.
//!
//! A [`Registry`] is populated with [`Mapping`]s, optionally under an event
//! alias and with a [`TransitionConfig`] attaching guards, an action,
//! concluders, required params and a blocked message.

mod definition;
mod error;
mod macros;
mod mapping;
mod registry;
mod transition;

pub use definition::{GuardSlot, TransitionDefinition};
pub use error::BuildError;
pub use mapping::Mapping;
pub use registry::Registry;
pub use transition::TransitionConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Params, Predicate, State, Subject};
    use crate::effects::{FnAction, StateMachine, TransitionError};
    use crate::test_support::Record;

    #[test]
    fn declared_configuration_drives_the_machine() {
        let mut registry = Registry::<Record>::new();
        registry
            .declare(
                crate::mapping! { [draft, pending] => paid },
                Some("pay"),
                Some(
                    TransitionConfig::new()
                        .require(["amount"])
                        .guard(
                            Predicate::new(|r: &Record, _: &State, _: &Params| r.flag)
                                .with_message("payment not authorized"),
                        )
                        .action(FnAction::new(|r: &mut Record, to: &State| {
                            r.journal.push(format!("charged for {to}"));
                            true
                        })),
                ),
            )
            .unwrap();

        let mut params = Params::new();
        params.insert("amount".into(), 20.into());

        let mut record = Record::at("pending");
        let mut machine = StateMachine::new(&registry, &mut record);
        assert!(matches!(
            machine.fire_hard("pay", &params),
            Err(TransitionError::GuardFailed { .. })
        ));

        machine.subject_mut().flag = true;
        assert!(matches!(
            machine.fire("pay", &Params::new()),
            Err(TransitionError::MissingParams { .. })
        ));
        assert!(machine.fire("pay", &params).unwrap());
        assert!(machine.is_in("paid"));
        assert_eq!(record.journal, ["charged for paid"]);
        assert_eq!(record.failure_messages(), ["payment not authorized"]);
    }
}
