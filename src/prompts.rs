// Default system-role prompts for each feature
pub const DEFAULT_FORMAT_SYSTEM_PROMPT: &str = "You are a helpful project assistant.";
pub const DEFAULT_SUMMARIZE_SYSTEM_PROMPT: &str = "You are a senior project manager assistant.";
pub const DEFAULT_ACTION_ITEMS_SYSTEM_PROMPT: &str = "You are a project management AI that extracts action items as a concise numbered markdown list with bolded titles.";
pub const DEFAULT_SENTIMENT_SYSTEM_PROMPT: &str = "You are a sentiment analysis AI.";
pub const DEFAULT_EMAIL_SYSTEM_PROMPT: &str = "You are an expert project manager and email writer.";

/// Sentence the model must return verbatim when an update has nothing actionable.
pub const NO_ACTION_ITEMS_FALLBACK: &str = "No specific action items found in the provided updates.";

// Define the text-generation features offered by the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Format,
    Summarize,
    ActionItems,
    Sentiment,
    Email,
}

impl Feature {
    /// Tag used to prefix log lines for this feature.
    pub fn log_tag(&self) -> &'static str {
        match self {
            Feature::Format => "FORMAT",
            Feature::Summarize => "SUMMARIZE",
            Feature::ActionItems => "ACTION-ITEMS",
            Feature::Sentiment => "SENTIMENT",
            Feature::Email => "EMAIL",
        }
    }

    pub fn default_system_prompt(&self) -> &'static str {
        match self {
            Feature::Format => DEFAULT_FORMAT_SYSTEM_PROMPT,
            Feature::Summarize => DEFAULT_SUMMARIZE_SYSTEM_PROMPT,
            Feature::ActionItems => DEFAULT_ACTION_ITEMS_SYSTEM_PROMPT,
            Feature::Sentiment => DEFAULT_SENTIMENT_SYSTEM_PROMPT,
            Feature::Email => DEFAULT_EMAIL_SYSTEM_PROMPT,
        }
    }
}

// Reformat a raw status update into five labelled sections
pub fn format_prompt(raw_update: &str) -> String {
    format!(
        r#"
You are a Project Management Assistant. Reformat the following update into 5 structured sections:
✅ Current Phase
🔜 Next Stage
⛔ Blockers
🛠 Actions Required
📅 Timeline or Deadline

For each section:
- Use bullet points for each item.
- Highlight key points using bold text or emojis.
- Make the update easy to read and visually clear.

---
Update: {raw_update}
"#
    )
}

// Stakeholder-facing summary of raw project notes
pub fn summarize_prompt(raw_notes: &str) -> String {
    format!(
        r#"
Act as a professional project manager. Given the following project notes, summarize the current project status clearly and concisely for stakeholders. Include:
- Project progress
- Current blockers
- Next steps
- Timeline and any deadlines

Use clear bullet points and structure.

---
Notes: {raw_notes}
"#
    )
}

// Numbered markdown list of action items with bold titles
pub fn action_items_prompt(project_name: &str, updates: &str) -> String {
    format!(
        r#"
Extract all specific action items from the following project updates. For each action item, write a single, clear sentence starting with a numbered markdown bullet (e.g., 1.), then the action title in bold (using markdown, e.g., **Title**), followed by a colon and a concise description. Keep each action item to a maximum of 1-2 lines. List each action item on a new line as a separate numbered bullet. Do not use JSON or field labels. Only return the list of action items. If there are no specific action items, reply with: {NO_ACTION_ITEMS_FALLBACK}

Example:
1. **Finalize Vendor Selection**: Follow up with Finance to review the latest proposal for the reporting module.
2. **Resolve Merge Conflict**: Dev team to address the merge conflict in the notification service update.
3. **Test User Role Flow Changes**: QA to test the user role flow changes once staging env stabilizes.

---
Project: {project_name}
Updates: {updates}
"#
    )
}

// Fixed-format sentiment classification with a short explanation
pub fn sentiment_prompt(project_name: &str, updates: &str) -> String {
    format!(
        r#"
Analyze the overall sentiment of the following project updates. Respond in the following format:

AI
Overall sentiment: <Positive/Neutral/Negative>

Explanation: <A brief explanation of the tone and key points in the updates.>

---
Project: {project_name}
Updates: {updates}
"#
    )
}

pub fn email_prompt(project_name: &str, updates: &str, sentiment: &str) -> String {
    format!(
        r#"
Write a professional project update email for the following project. Use the sentiment: {sentiment}.

---
Project: {project_name}
Updates: {updates}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prompt_lists_all_sections() {
        let prompt = format_prompt("API migration is 80% done");
        for section in [
            "Current Phase",
            "Next Stage",
            "Blockers",
            "Actions Required",
            "Timeline or Deadline",
        ] {
            assert!(prompt.contains(section), "missing section {section}");
        }
        assert!(prompt.trim_end().ends_with("Update: API migration is 80% done"));
    }

    #[test]
    fn test_summarize_prompt_interpolates_notes() {
        let prompt = summarize_prompt("QA blocked on staging");
        assert!(prompt.contains("for stakeholders"));
        assert!(prompt.contains("Notes: QA blocked on staging"));
    }

    #[test]
    fn test_action_items_prompt_has_example_and_fallback() {
        let prompt = action_items_prompt("Apollo", "Vendor call on Friday");
        assert!(prompt.contains("1. **Finalize Vendor Selection**:"));
        assert!(prompt.contains(&format!("reply with: {NO_ACTION_ITEMS_FALLBACK}")));
        assert!(prompt.contains("Project: Apollo\nUpdates: Vendor call on Friday"));
    }

    #[test]
    fn test_sentiment_prompt_format() {
        let prompt = sentiment_prompt("Apollo", "All green");
        assert!(prompt.contains("Overall sentiment: <Positive/Neutral/Negative>"));
        assert!(prompt.contains("Explanation:"));
    }

    #[test]
    fn test_email_prompt_uses_sentiment() {
        let prompt = email_prompt("Apollo", "Launch slipped a week", "Negative");
        assert!(prompt.contains("Use the sentiment: Negative."));
        assert!(prompt.contains("Project: Apollo"));
    }

    #[test]
    fn test_absent_slots_render_empty() {
        let prompt = email_prompt("", "Launch slipped", "");
        assert!(prompt.contains("Use the sentiment: ."));
        assert!(prompt.contains("Project: \n"));
    }

    #[test]
    fn test_slot_contents_are_not_interpreted() {
        let prompt = sentiment_prompt("{updates}", "{project_name}");
        assert!(prompt.contains("Project: {updates}\nUpdates: {project_name}"));
    }

    #[test]
    fn test_every_feature_has_system_prompt() {
        let features = [
            Feature::Format,
            Feature::Summarize,
            Feature::ActionItems,
            Feature::Sentiment,
            Feature::Email,
        ];
        for feature in features {
            assert!(!feature.default_system_prompt().is_empty());
            assert!(!feature.log_tag().is_empty());
        }
    }
}
