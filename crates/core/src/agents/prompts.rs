//! Prompt construction for the four agents.
//!
//! System prompts carry the agent's role; task prompts carry the request
//! specifics. Kept together here so the whole prompt surface is in one
//! place.

use crate::platforms::Platform;
use crate::workflow::request::ContentOptions;

pub const RESEARCH_SYSTEM: &str = "You are an expert researcher with years of experience in \
content strategy and market analysis. You excel at finding the most relevant and up-to-date \
information on any topic, synthesizing multiple sources, and presenting insights that content \
creators can immediately use. Always cite your sources and focus on practical, actionable \
information.";

pub const LEAD_GEN_SYSTEM: &str = "You are a seasoned lead generation expert with deep \
knowledge of social media platforms, influencer marketing, and community building. You excel \
at identifying the right people and organizations for specific topics, understand engagement \
metrics and audience quality, and can spot authentic influencers from fake ones.";

pub const CONTENT_SYSTEM: &str = "You are a master content creator with expertise across all \
major social media platforms and content formats. You understand the nuances of each platform \
and craft content that informs, engages, and inspires action.";

pub const OUTREACH_SYSTEM: &str = "You are a master of authentic relationship building and \
persuasive communication, with years of experience in influencer marketing, partnership \
development, and community building. Great outreach provides value first and builds long-term \
relationships; your messages are personal, valuable, and genuine - never spammy or pushy.";

fn platform_list(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Research task for a topic.
pub fn research_task(topic: &str, platforms: &[Platform]) -> String {
    let platform_context = if platforms.is_empty() {
        String::new()
    } else {
        format!(
            " Focus on content suitable for {}.",
            platform_list(platforms)
        )
    };

    format!(
        "Conduct comprehensive research on the topic: \"{topic}\".{platform_context}\n\n\
         Your research should cover current trends and developments, key statistics, expert \
         opinions, practical applications, audience interests, and content opportunities.\n\n\
         Provide a detailed research brief in markdown with: an executive summary, key \
         findings with sources, content recommendations, trending subtopics, and target \
         audience insights. Always cite your sources."
    )
}

/// Lead generation task for a topic.
pub fn lead_generation_task(topic: &str, platforms: &[Platform], max_leads: usize) -> String {
    let platform_filter = if platforms.is_empty() {
        String::new()
    } else {
        format!(" Focus on {} platforms.", platform_list(platforms))
    };

    format!(
        "Generate high-quality leads related to the topic: \"{topic}\".{platform_filter}\n\n\
         Find influencers and creators discussing this topic, brands active in the space, \
         relevant communities, and thought leaders. Prioritize high engagement rates over \
         raw follower counts, authentic audiences, and strong topic relevance.\n\n\
         Return up to {max_leads} leads as a JSON array; each lead needs: id, name, platform, \
         profile_url, follower_count, engagement_rate, relevance_score, last_active, niche, \
         bio, contact_email, tags, outreach_priority."
    )
}

/// Content creation task across platforms.
pub fn content_task(
    topic: &str,
    tone: &str,
    platforms: &[Platform],
    research_brief: &str,
    options: &ContentOptions,
) -> String {
    let brief_excerpt = if research_brief.is_empty() {
        "No research brief provided".to_string()
    } else {
        let mut cut = research_brief.len().min(1000);
        while !research_brief.is_char_boundary(cut) {
            cut -= 1;
        }
        research_brief[..cut].to_string()
    };

    let guidelines: String = platforms
        .iter()
        .map(|p| {
            let spec = p.spec();
            format!(
                "- {}: {} {} of at most {} characters",
                p.display_name(),
                spec.style,
                spec.format,
                spec.max_length
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create engaging content about \"{topic}\" for the following platforms: {}.\n\n\
         Content Requirements:\n\
         - Tone: {tone}\n\
         - Length: {}\n\
         - Target Audience: {}\n\
         - Include hashtags: {}\n\
         - Include call-to-action: {}\n\n\
         Research Context:\n{brief_excerpt}\n\n\
         Custom Instructions:\n{}\n\n\
         Platform-Specific Guidelines:\n{guidelines}\n\n\
         Return a JSON object mapping each platform name to its finished content. Each piece \
         must provide genuine value, follow the platform's character limits and best \
         practices, and encourage meaningful engagement.",
        platform_list(platforms),
        options.content_length,
        options.target_audience.as_deref().unwrap_or("general audience"),
        options.include_hashtags,
        options.include_cta,
        options.custom_instructions.as_deref().unwrap_or("None"),
    )
}

/// Outreach task for a list of leads (serialized as JSON context).
pub fn outreach_task(topic: &str, tone: &str, outreach_type: &str, leads_json: &str) -> String {
    format!(
        "Create personalized outreach messages for the following leads related to the topic \
         \"{topic}\".\n\n\
         Outreach Type: {outreach_type}\n\
         Brand Tone: {tone}\n\n\
         Leads:\n{leads_json}\n\n\
         For each lead craft a personalized subject line, a compelling message that \
         acknowledges their specific work, provides a clear value proposition, and ends with \
         a low-pressure call-to-action, plus a follow-up template. Match the communication \
         style of their platform.\n\n\
         Return a JSON array; each entry needs: lead_id, recipient_name, platform, \
         subject_line, message_body, follow_up_template, estimated_response_rate, \
         best_send_time, personalization_score, platform_specific_notes."
    )
}
