use rustrict::CensorStr;

#[derive(Debug)]
pub struct ProfanityFilter;

impl ProfanityFilter {
    pub fn validate_label(label: &str) -> Result<(), String> {
        if label.is_inappropriate() {
            return Err(format!("Inappropriate language detected: {}", label));
        }
        Ok(())
    }

    pub fn get_censored_text(text: &str) -> String {
        text.censor()
    }
}
