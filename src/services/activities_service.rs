use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::ActivityDirectory;
use crate::models::Activity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
}

pub fn list_activities(directory: &ActivityDirectory) -> IndexMap<String, Activity> {
    directory.list()
}

/// Add `email` to the named activity. Capacity is not checked.
pub fn signup(
    directory: &ActivityDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, SignupError> {
    directory
        .update(activity_name, |activity| {
            if activity.has_participant(email) {
                return Err(SignupError::AlreadySignedUp);
            }
            activity.participants.push(email.to_string());
            if activity.participants.len() > activity.max_participants as usize {
                debug!(
                    activity = %activity_name,
                    max = activity.max_participants,
                    "signup accepted beyond advertised capacity"
                );
            }
            Ok(())
        })
        .ok_or(SignupError::ActivityNotFound)??;

    info!(activity = %activity_name, email = %email, "student signed up");
    Ok(format!("{} signed up for {}", email, activity_name))
}

pub fn unregister(
    directory: &ActivityDirectory,
    activity_name: &str,
    email: &str,
) -> Result<String, SignupError> {
    directory
        .update(activity_name, |activity| {
            let Some(pos) = activity.participants.iter().position(|p| p == email) else {
                return Err(SignupError::NotRegistered);
            };
            activity.participants.remove(pos);
            Ok(())
        })
        .ok_or(SignupError::ActivityNotFound)??;

    info!(activity = %activity_name, email = %email, "student unregistered");
    Ok(format!("{} unregistered from {}", email, activity_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_appends_in_order() {
        let dir = ActivityDirectory::seeded();
        let msg = signup(&dir, "Chess Club", "test@mergington.edu").unwrap();
        assert_eq!(msg, "test@mergington.edu signed up for Chess Club");
        assert_eq!(
            dir.get("Chess Club").unwrap().participants,
            vec![
                "michael@mergington.edu",
                "daniel@mergington.edu",
                "test@mergington.edu"
            ]
        );
    }

    #[test]
    fn duplicate_signup_is_rejected_without_mutation() {
        let dir = ActivityDirectory::seeded();
        assert_eq!(
            signup(&dir, "Chess Club", "michael@mergington.edu"),
            Err(SignupError::AlreadySignedUp)
        );
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 2);
    }

    #[test]
    fn unknown_activity_wins_over_email_checks() {
        let dir = ActivityDirectory::seeded();
        assert_eq!(
            signup(&dir, "Nonexistent Activity", "michael@mergington.edu"),
            Err(SignupError::ActivityNotFound)
        );
        assert_eq!(
            unregister(&dir, "Nonexistent Activity", "nobody@mergington.edu"),
            Err(SignupError::ActivityNotFound)
        );
    }

    #[test]
    fn capacity_is_not_enforced() {
        let dir = ActivityDirectory::seeded();
        for i in 0..15 {
            signup(&dir, "Chess Club", &format!("s{}@mergington.edu", i)).unwrap();
        }
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 17);
    }

    #[test]
    fn unregister_removes_only_that_email() {
        let dir = ActivityDirectory::seeded();
        let msg = unregister(&dir, "Gym Class", "john@mergington.edu").unwrap();
        assert_eq!(msg, "john@mergington.edu unregistered from Gym Class");
        assert_eq!(
            dir.get("Gym Class").unwrap().participants,
            vec!["olivia@mergington.edu"]
        );
        assert_eq!(
            unregister(&dir, "Gym Class", "john@mergington.edu"),
            Err(SignupError::NotRegistered)
        );
    }

    #[test]
    fn empty_email_is_an_ordinary_value() {
        let dir = ActivityDirectory::seeded();
        signup(&dir, "Chess Club", "").unwrap();
        assert!(dir.get("Chess Club").unwrap().has_participant(""));
        unregister(&dir, "Chess Club", "").unwrap();
        assert!(!dir.get("Chess Club").unwrap().has_participant(""));
    }

    #[test]
    fn concurrent_duplicate_signups_admit_one() {
        let dir = ActivityDirectory::seeded();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dir = dir.clone();
                std::thread::spawn(move || signup(&dir, "Chess Club", "race@mergington.edu"))
            })
            .collect();
        let ok = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(ok, 1);
        assert_eq!(dir.get("Chess Club").unwrap().participants.len(), 3);
    }
}
