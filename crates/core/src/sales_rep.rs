use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, required_text};
use crate::ids::SalesRepId;

/// An internal seller who runs meetings with prospects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesRep {
    pub id: SalesRepId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A roster entry before it has an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSalesRep {
    pub name: String,
    pub email: String,
}

impl NewSalesRep {
    pub fn new(name: Option<String>, email: Option<String>) -> Result<Self> {
        let name = required_text("name", name)?;
        let email = required_text("email", email)?.to_lowercase();
        if !email.contains('@') {
            return Err(CoreError::InvalidField {
                field: "email",
                reason: format!("'{email}' is not an email address"),
            });
        }
        Ok(Self { name, email })
    }
}

/// A rep together with the number of meetings referencing them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepLoad {
    pub rep: SalesRep,
    pub meeting_count: i64,
}

/// Pick the least-loaded rep: lowest meeting count, ties broken by lowest id.
#[must_use]
pub fn least_loaded(loads: &[RepLoad]) -> Option<&RepLoad> {
    loads.iter().min_by_key(|l| (l.meeting_count, l.rep.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(id: i64, count: i64) -> RepLoad {
        RepLoad {
            rep: SalesRep {
                id: SalesRepId(id),
                name: format!("Rep {id}"),
                email: format!("rep{id}@example.com"),
                created_at: Utc::now(),
            },
            meeting_count: count,
        }
    }

    #[test]
    fn least_loaded_prefers_lowest_count() {
        let loads = vec![load(1, 3), load(2, 0), load(3, 1)];
        assert_eq!(least_loaded(&loads).unwrap().rep.id, SalesRepId(2));
    }

    #[test]
    fn least_loaded_breaks_ties_by_id() {
        let loads = vec![load(5, 1), load(3, 1), load(4, 2)];
        assert_eq!(least_loaded(&loads).unwrap().rep.id, SalesRepId(3));
    }

    #[test]
    fn least_loaded_empty_roster() {
        assert!(least_loaded(&[]).is_none());
    }

    #[test]
    fn new_sales_rep_validates() {
        assert!(NewSalesRep::new(Some("Ada".to_owned()), Some("ada@x.com".to_owned())).is_ok());
        assert_eq!(
            NewSalesRep::new(None, Some("ada@x.com".to_owned())).unwrap_err(),
            CoreError::MissingField("name")
        );
        assert!(NewSalesRep::new(Some("Ada".to_owned()), Some("nope".to_owned())).is_err());
    }
}
