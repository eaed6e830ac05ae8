use crate::model::summary::Summary;

/// Builds the prompt sent to the completion backend.
/// Only formats text: no lookups, no networking.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(summary: &Summary, topic: &str) -> String {
        let mut prompt = String::new();

        push_line(&mut prompt, "Topic", topic);
        push_line(&mut prompt, "Attackers", summary.attackers());
        push_line(&mut prompt, "Attacking Corporation", summary.attacking_corp());
        push_line(&mut prompt, "Top Damage", summary.top_damage());
        push_line(&mut prompt, "Final Blow", summary.final_blow());
        push_line(&mut prompt, "Victim", summary.victim());
        push_line(&mut prompt, "Victim Corporation", summary.victim_corp());
        prompt.push('\n');
        prompt.push_str("Story:");

        prompt
    }
}

fn push_line(prompt: &mut String, label: &str, value: &str) {
    prompt.push_str(&format!("{}: {}\n", label, value));
}
