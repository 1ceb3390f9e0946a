use async_trait::async_trait;
use std::fmt::Debug;
use vkapi_core::{Result, VkError};

/// Captcha the server asked for, taken from a captcha-required error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pub sid: String,
    pub img: Option<String>,
}

impl CaptchaChallenge {
    /// `None` when the error carries no `captcha_sid`
    pub fn from_error(error: &VkError) -> Option<Self> {
        let sid = error.captcha_sid.clone().filter(|sid| !sid.is_empty())?;
        Some(Self {
            sid,
            img: error.captcha_img.clone(),
        })
    }
}

/// Source of captcha answers.
///
/// Returning an error aborts the call with that error.
#[async_trait]
pub trait CaptchaSolver: Debug + Send + Sync {
    async fn solve(&self, challenge: &CaptchaChallenge) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_requires_sid() {
        let mut error = VkError::new(14, "Captcha needed");
        assert!(CaptchaChallenge::from_error(&error).is_none());

        error.captcha_sid = Some(String::new());
        assert!(CaptchaChallenge::from_error(&error).is_none());

        error.captcha_sid = Some("239".into());
        error.captcha_img = Some("https://api.vk.com/captcha.php?sid=239".into());
        let challenge = CaptchaChallenge::from_error(&error).unwrap();
        assert_eq!(challenge.sid, "239");
        assert_eq!(
            challenge.img.as_deref(),
            Some("https://api.vk.com/captcha.php?sid=239")
        );
    }

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl CaptchaSolver for Echo {
        async fn solve(&self, challenge: &CaptchaChallenge) -> Result<String> {
            Ok(challenge.sid.chars().rev().collect())
        }
    }

    #[test]
    fn test_solver_as_trait_object() {
        let solver: Box<dyn CaptchaSolver> = Box::new(Echo);
        let challenge = CaptchaChallenge {
            sid: "123".into(),
            img: None,
        };
        let key = tokio_test::block_on(solver.solve(&challenge)).unwrap();
        assert_eq!(key, "321");
    }
}
