//! Player identity bound to a session.

use crate::{Mark, ProfileError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Opaque reference to a chosen avatar (file name, path or asset id).
///
/// The engine never looks inside; the presentation layer resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct AvatarRef(String);

impl AvatarRef {
    /// Wraps an avatar reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the raw reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for AvatarRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for AvatarRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// Immutable identity of one player for the length of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PlayerProfile {
    /// Display name, never blank.
    name: String,
    /// Chosen avatar.
    avatar: AvatarRef,
    /// Mark this player places.
    mark: Mark,
}

impl PlayerProfile {
    /// Creates a profile for the seat that plays `mark`.
    ///
    /// The name is trimmed; a blank name becomes the seat placeholder
    /// ("Player 1" for X, "Player 2" for O).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingAvatar`] if no avatar (or a blank one)
    /// was chosen.
    #[instrument(skip(name, avatar), fields(seat = mark.seat()))]
    pub fn create(
        name: &str,
        avatar: Option<AvatarRef>,
        mark: Mark,
    ) -> Result<Self, ProfileError> {
        let Some(avatar) = avatar.filter(|a| !a.is_blank()) else {
            warn!(seat = mark.seat(), "Profile rejected: no avatar chosen");
            return Err(ProfileError::MissingAvatar { seat: mark.seat() });
        };

        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            debug!("Blank name, using seat placeholder");
            mark.placeholder_name()
        } else {
            trimmed.to_string()
        };

        debug!(%name, %avatar, %mark, "Profile created");
        Ok(Self { name, avatar, mark })
    }

    /// Checks that this profile sits in the seat that plays `expected`.
    pub(crate) fn check_seat(&self, expected: Mark) -> Result<(), ProfileError> {
        if self.mark == expected {
            Ok(())
        } else {
            Err(ProfileError::SeatMismatch {
                seat: expected.seat(),
                expected,
                found: self.mark,
            })
        }
    }
}

/// Raw setup input for one seat: typed name plus an optional avatar choice.
///
/// This is what a setup screen holds before the player presses start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Name as typed, possibly blank.
    pub name: String,
    /// Avatar choice, if one was made.
    pub avatar: Option<AvatarRef>,
}

impl PlayerSetup {
    /// Creates setup input.
    pub fn new(name: impl Into<String>, avatar: Option<AvatarRef>) -> Self {
        Self {
            name: name.into(),
            avatar,
        }
    }

    /// Converts into a profile for the seat playing `mark`.
    pub fn into_profile(self, mark: Mark) -> Result<PlayerProfile, ProfileError> {
        PlayerProfile::create(&self.name, self.avatar, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let profile = PlayerProfile::create("  Ada  ", Some("cat.png".into()), Mark::X).unwrap();
        assert_eq!(profile.name(), "Ada");
        assert_eq!(profile.avatar().as_str(), "cat.png");
        assert_eq!(*profile.mark(), Mark::X);
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let p1 = PlayerProfile::create("", Some("a.png".into()), Mark::X).unwrap();
        let p2 = PlayerProfile::create(" \t ", Some("b.png".into()), Mark::O).unwrap();
        assert_eq!(p1.name(), "Player 1");
        assert_eq!(p2.name(), "Player 2");
    }

    #[test]
    fn test_missing_avatar_rejected() {
        let result = PlayerProfile::create("Ada", None, Mark::O);
        assert_eq!(result, Err(ProfileError::MissingAvatar { seat: 2 }));
    }

    #[test]
    fn test_blank_avatar_counts_as_missing() {
        let result = PlayerProfile::create("Ada", Some("   ".into()), Mark::X);
        assert_eq!(result, Err(ProfileError::MissingAvatar { seat: 1 }));
    }

    #[test]
    fn test_seat_check() {
        let profile = PlayerProfile::create("Bo", Some("b.png".into()), Mark::O).unwrap();
        assert!(profile.check_seat(Mark::O).is_ok());
        assert_eq!(
            profile.check_seat(Mark::X),
            Err(ProfileError::SeatMismatch {
                seat: 1,
                expected: Mark::X,
                found: Mark::O,
            })
        );
    }

    #[test]
    fn test_setup_into_profile() {
        let setup = PlayerSetup::new("", Some(AvatarRef::new("owl.jpg")));
        let profile = setup.into_profile(Mark::O).unwrap();
        assert_eq!(profile.name(), "Player 2");
    }
}
