use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, PzError};
use crate::evaluator::FragmentFamily;

/// Width of a [`LogRecord`], fixed by the wider pipeline
pub const LOG_RECORD_SLOTS: usize = 8;

/// One named numeric slot of a [`LogRecord`]. `None` means unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSlot {
    pub name: String,
    pub value: Option<f64>,
}

/// Caller-owned fixed-width record shared across pipeline stages.
///
/// A tuning run writes exactly two slots, `<label>_penalty` and
/// `<label>_outlier_penalty`, where the label comes from the evaluator.
/// Every other slot passes through untouched, so upstream stages can
/// pre-fill slots for the families they already tuned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    slots: Vec<LogSlot>,
}

impl LogRecord {
    /// Record with the canonical layout: one penalty and one outlier
    /// penalty slot per fragment family, all unset.
    pub fn new() -> Self {
        let slots = FragmentFamily::ALL
            .iter()
            .flat_map(|family| {
                [
                    LogSlot {
                        name: format!("{}_penalty", family.label()),
                        value: None,
                    },
                    LogSlot {
                        name: format!("{}_outlier_penalty", family.label()),
                        value: None,
                    },
                ]
            })
            .collect();
        Self { slots }
    }

    /// Record with a caller-defined layout. Exactly [`LOG_RECORD_SLOTS`]
    /// uniquely named slots are required.
    pub fn with_slots<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slots: Vec<LogSlot> = names
            .into_iter()
            .map(|name| LogSlot {
                name: name.into(),
                value: None,
            })
            .collect();
        let record = Self { slots };
        record.validate()?;
        Ok(record)
    }

    /// Check the fixed width and slot-name uniqueness.
    ///
    /// Construction already enforces both, but records that arrive through
    /// deserialization have not been through a constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.len() != LOG_RECORD_SLOTS {
            return Err(ConfigError::MalformedRecord {
                expected: LOG_RECORD_SLOTS,
                got: self.slots.len(),
            });
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if self.slots[..i].iter().any(|other| other.name == slot.name) {
                return Err(ConfigError::DuplicateSlot {
                    name: slot.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Write a value into the named slot
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), PzError> {
        match self.slots.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => {
                slot.value = Some(value);
                Ok(())
            }
            None => Err(PzError::Record(format!(
                "no log record slot named '{name}'"
            ))),
        }
    }

    /// Read the named slot; `None` if the slot is unset or absent
    pub fn get(&self, name: &str) -> Option<f64> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.value)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn slots(&self) -> &[LogSlot] {
        &self.slots
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new()
    }
}
