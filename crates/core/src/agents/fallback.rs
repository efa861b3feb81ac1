//! Template fallback generators.
//!
//! Everything here runs locally and instantly. The payloads are shaped
//! exactly like live results; only the surrounding
//! [`AgentOutcome::Degraded`](super::outcome::AgentOutcome) variant marks
//! them as fabricated.

use crate::agents::lead_generation::{relevance_score, Lead};
use crate::agents::outreach::{best_send_time, tone_guideline, value_proposition, OutreachMessage};
use crate::agents::research::{trend_snapshot, ResearchData};
use crate::platforms::Platform;
use crate::workflow::request::ContentOptions;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

const MAX_MOCK_LEADS: usize = 10;

const ENGAGEMENT_CTAS: &[&str] = &[
    "What are your thoughts on this?",
    "Have you experienced this too?",
    "Share your experience in the comments!",
    "What would you add to this list?",
    "Tag someone who needs to see this!",
    "What's your take on this topic?",
];

/// Templated research brief for when the live path is unavailable.
pub fn research_brief(topic: &str, platforms: &[Platform]) -> ResearchData {
    let platform_note = if platforms.is_empty() {
        String::new()
    } else {
        format!(
            "\n\n## Platform Fit\nBest suited for: {}.",
            platforms
                .iter()
                .map(|p| p.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let brief = format!(
        "# Research Brief: {topic}\n\n\
         ## Executive Summary\n\
         {topic} is drawing sustained attention across industries. Organizations adopting it \
         early report measurable gains in efficiency and audience engagement.\n\n\
         ## Key Findings\n\
         - Adoption is accelerating across mid-size and enterprise organizations.\n\
         - Audiences respond best to practical, example-driven coverage of {topic}.\n\
         - Skill demand around {topic} continues to outpace supply.\n\n\
         ## Trend Snapshot\n{}\n\n\
         ## Content Recommendations\n\
         - Lead with concrete outcomes rather than definitions.\n\
         - Pair each claim with a real-world example.\n\
         - Close with a clear next step for the reader.{platform_note}",
        trend_snapshot(topic),
    );

    ResearchData {
        research_brief: brief,
        sources: Vec::new(),
    }
}

/// Randomized mock leads, ranked by relevance, capped at ten.
pub fn mock_leads(topic: &str, platforms: &[Platform], count: usize) -> Vec<Lead> {
    let mut rng = rand::thread_rng();
    let pool: Vec<Platform> = if platforms.is_empty() {
        vec![
            Platform::LinkedIn,
            Platform::YouTube,
            Platform::Instagram,
            Platform::Twitter,
        ]
    } else {
        platforms.to_vec()
    };

    let topic_slug = topic.to_lowercase().replace(' ', "");
    let topic_title = title_case(topic);

    let mut leads: Vec<Lead> = (0..count.min(MAX_MOCK_LEADS))
        .map(|i| {
            let platform = *pool.choose(&mut rng).expect("platform pool is non-empty");
            let follower_count = rng.gen_range(5_000..100_000);
            let engagement_rate = round3(rng.gen_range(0.01..0.08));
            Lead {
                id: format!("lead_{}", i + 1),
                name: format!("{topic_title}Expert{}", i + 1),
                platform,
                profile_url: format!(
                    "https://{}.com/{topic_slug}expert{}",
                    platform.display_name().to_lowercase().replace(' ', ""),
                    i + 1
                ),
                follower_count,
                engagement_rate,
                relevance_score: relevance_score(follower_count, engagement_rate)
                    .max(rng.gen_range(0.60..0.95)),
                last_active: "2024-01-15".to_string(),
                niche: topic.to_string(),
                bio: format!(
                    "Expert in {topic} with {} years of experience",
                    rng.gen_range(5..15)
                ),
                contact_email: format!("{topic_slug}expert{}@example.com", i + 1),
                tags: vec![
                    topic.to_string(),
                    platform.display_name().to_string(),
                    "Influencer".to_string(),
                ],
                outreach_priority: if rng.gen_bool(0.5) { "High" } else { "Medium" }.to_string(),
            }
        })
        .collect();

    leads.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    leads
}

/// Template content for every requested platform.
pub fn mock_content(
    topic: &str,
    tone: &str,
    platforms: &[Platform],
    options: &ContentOptions,
) -> BTreeMap<String, String> {
    platforms
        .iter()
        .map(|p| {
            (
                p.display_name().to_string(),
                platform_content(topic, tone, *p, options),
            )
        })
        .collect()
}

/// Template content for one platform, with hashtags and CTA applied per
/// the request options.
pub fn platform_content(
    topic: &str,
    tone: &str,
    platform: Platform,
    options: &ContentOptions,
) -> String {
    let audience = options
        .target_audience
        .as_deref()
        .unwrap_or("professionals");
    let mut content = base_content(topic, tone, platform, audience);

    if options.include_hashtags && platform.spec().hashtag_max > 0 {
        content.push_str("\n\n");
        content.push_str(&hashtags(topic));
    }
    if options.include_cta {
        content.push_str("\n\n");
        content.push_str(engagement_cta());
    }
    content
}

fn base_content(topic: &str, tone: &str, platform: Platform, audience: &str) -> String {
    let topic_lower = topic.to_lowercase();
    match platform {
        Platform::LinkedIn => format!(
            "The Future of {topic}: What {} Need to Know\n\n\
             {topic} is reshaping how we work and think. A {tone} look at the key insights:\n\n\
             Current State:\n\
             The landscape is evolving rapidly, and organizations that adapt quickly are \
             seeing significant advantages.\n\n\
             Key Trends:\n\
             - Increased adoption across industries\n\
             - Growing investment in related technologies\n\
             - Shift in required skill sets\n\n\
             What This Means for You:\n\
             Understanding {topic_lower} is becoming essential. The organizations that embrace \
             this change will lead the future. Are you ready to be part of it?",
            title_case(audience),
        ),
        Platform::Twitter => format!(
            "Thread: Why {topic} matters more than you think\n\n\
             1/ {topic} isn't just a buzzword - it's reshaping entire industries. Here's what \
             you need to know\n\n\
             2/ It's not just about the technology. It's about how we adapt and evolve with it.\n\n\
             3/ Three areas where {topic_lower} is making the biggest impact: decision making, \
             customer experience, operational efficiency.\n\n\
             4/ The question isn't IF this will affect your industry, but WHEN. Start learning now."
        ),
        Platform::Instagram => format!(
            "Let's talk about {topic}\n\n\
             {topic} isn't just tech talk - it's the future of how we work, create, and \
             connect.\n\n\
             Here's what's got me excited:\n\
             New possibilities we never imagined\n\
             Tools that actually make life easier\n\
             Opportunities for everyone to grow\n\n\
             I used to think {topic_lower} was just for experts, but it's for creators, \
             entrepreneurs, students - literally everyone. And we're just getting started."
        ),
        Platform::YouTube => format!(
            "The Complete Guide to {topic}: Everything You Need to Know\n\n\
             Welcome back to the channel! Today we're diving deep into {topic}.\n\n\
             What We'll Cover:\n\
             - What {topic_lower} actually is, in simple terms\n\
             - Why it matters for your career or business\n\
             - Real-world examples and case studies\n\
             - How to get started today\n\
             - Common mistakes to avoid\n\n\
             By the end of this video you'll have a clear understanding of how {topic_lower} \
             can impact your industry and what steps to take immediately to stay ahead."
        ),
        Platform::Newsletter => format!(
            "Subject: The {topic} Revolution: Your Weekly Insight\n\n\
             Dear Subscriber,\n\n\
             This week I want to talk about {topic}.\n\n\
             THE BIG PICTURE\n\
             {topic} is fundamentally changing how we approach problems, make decisions, and \
             create value. The organizations that understand this early are positioning \
             themselves for unprecedented growth.\n\n\
             WHAT THIS MEANS FOR YOU\n\
             Three immediate actions you can take:\n\
             1. Spend 30 minutes this week learning about {topic_lower}\n\
             2. Identify where {topic_lower} could add value in your current role\n\
             3. Start small - pick one area to experiment with\n\n\
             Until next week, keep innovating!"
        ),
        Platform::Blog => format!(
            "# The Complete Guide to {topic}\n\n\
             ## Introduction\n\
             Few topics have generated as much transformation as {topic_lower}. What started \
             as a niche concept has become a fundamental force reshaping industries and \
             careers.\n\n\
             ## What is {topic}?\n\
             {topic} represents a shift in how we process information, make decisions, and \
             create value.\n\n\
             ### Key Characteristics\n\
             - **Scalability**: solutions that grow with your needs\n\
             - **Efficiency**: dramatic improvements in speed and accuracy\n\
             - **Adaptability**: systems that learn and improve over time\n\n\
             ## Getting Started\n\
             Begin with education, identify opportunities in your current role, and build \
             expertise gradually through small, manageable projects.\n\n\
             ## Conclusion\n\
             Early adopters gain significant advantages. The time to start is now."
        ),
    }
}

/// Randomized mock outreach messages for the first five leads.
pub fn mock_outreach(
    topic: &str,
    tone: &str,
    leads: &[Lead],
    outreach_type: &str,
) -> Vec<OutreachMessage> {
    let mut rng = rand::thread_rng();

    leads
        .iter()
        .take(super::outreach::MAX_MESSAGES_PER_RUN)
        .map(|lead| {
            let subject = subject_line(topic, lead, outreach_type);
            OutreachMessage {
                lead_id: lead.id.clone(),
                recipient_name: lead.name.clone(),
                platform: lead.platform,
                subject_line: subject,
                message_body: message_body(topic, tone, lead, outreach_type),
                follow_up_template: follow_up(lead),
                estimated_response_rate: round2(rng.gen_range(0.15..0.35)),
                best_send_time: best_send_time(lead.platform).to_string(),
                personalization_score: round2(rng.gen_range(0.70..0.95)),
                platform_specific_notes: tone_guideline(lead.platform).to_string(),
            }
        })
        .collect()
}

fn subject_line(topic: &str, lead: &Lead, outreach_type: &str) -> String {
    match outreach_type {
        "guest_post" => format!("Guest content opportunity - {topic}"),
        "partnership" => format!("Partnership opportunity in {}", lead.niche),
        "interview" | "interview_request" => format!("Interview request - {topic} expertise"),
        _ => format!("Collaboration idea for {} - {topic}", lead.name),
    }
}

fn message_body(topic: &str, tone: &str, lead: &Lead, outreach_type: &str) -> String {
    let niche = if lead.niche.is_empty() {
        topic
    } else {
        &lead.niche
    };
    format!(
        "Hi {},\n\n\
         I came across your {} profile and was impressed by your work in {niche} - \
         {}.\n\n\
         I'm reaching out because I believe we could create something valuable together \
         around {topic}. What I have in mind: {}.\n\n\
         Keeping this {tone} and brief - would you be open to a 15-minute call this week \
         to explore it?\n\n\
         Best regards",
        lead.name,
        lead.platform.display_name(),
        super::outreach::social_proof(lead.follower_count),
        value_proposition(outreach_type),
    )
}

fn follow_up(lead: &Lead) -> String {
    format!(
        "Hi {}, just floating my last note back to the top of your inbox. No pressure at \
         all - happy to share a one-page outline if that's easier to react to.",
        lead.name
    )
}

/// Hashtags for a topic: keyword-table matches plus the topic's own tag.
pub fn hashtags(topic: &str) -> String {
    const TABLE: &[(&str, &[&str])] = &[
        (
            "ai",
            &["#AI", "#ArtificialIntelligence", "#MachineLearning", "#Tech", "#Innovation"],
        ),
        (
            "marketing",
            &["#Marketing", "#DigitalMarketing", "#ContentMarketing", "#SocialMedia", "#Branding"],
        ),
        (
            "business",
            &["#Business", "#Entrepreneurship", "#Leadership", "#Strategy", "#Growth"],
        ),
        (
            "technology",
            &["#Technology", "#Tech", "#Innovation", "#Digital", "#Future"],
        ),
        (
            "productivity",
            &["#Productivity", "#Efficiency", "#WorkSmart", "#TimeManagement", "#Success"],
        ),
    ];

    let topic_lower = topic.to_lowercase();
    let mut tags: Vec<String> = Vec::new();
    for (keyword, keyword_tags) in TABLE {
        if topic_lower.contains(keyword) {
            tags.extend(keyword_tags.iter().map(|t| t.to_string()));
        }
    }
    tags.push(format!("#{}", title_case(topic).replace(' ', "")));

    tags.dedup();
    tags.truncate(8);
    tags.join(" ")
}

/// A random call-to-action line.
pub fn engagement_cta() -> &'static str {
    ENGAGEMENT_CTAS
        .choose(&mut rand::thread_rng())
        .expect("CTA list is non-empty")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ContentOptions {
        ContentOptions::default()
    }

    #[test]
    fn test_mock_leads_capped_and_sorted() {
        let leads = mock_leads("AI tools", &[Platform::LinkedIn], 50);
        assert_eq!(leads.len(), 10);
        for pair in leads.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        for lead in &leads {
            assert_eq!(lead.platform, Platform::LinkedIn);
            assert!((5_000..100_000).contains(&lead.follower_count));
            assert!(lead.engagement_rate >= 0.01 && lead.engagement_rate <= 0.08);
            assert!(lead.relevance_score >= 0.60);
        }
    }

    #[test]
    fn test_mock_leads_default_platform_pool() {
        let leads = mock_leads("AI", &[], 5);
        assert_eq!(leads.len(), 5);
    }

    #[test]
    fn test_mock_content_covers_all_platforms() {
        let platforms = Platform::all();
        let content = mock_content("AI tools", "professional", &platforms, &options());
        for platform in platforms {
            let body = content.get(platform.display_name()).unwrap();
            assert!(body.contains("AI tools") || body.contains("ai tools"));
        }
    }

    #[test]
    fn test_platform_content_respects_options() {
        let bare = ContentOptions {
            include_hashtags: false,
            include_cta: false,
            ..ContentOptions::default()
        };
        let body = platform_content("AI", "casual", Platform::LinkedIn, &bare);
        assert!(!body.contains('#'));

        let full = platform_content("AI", "casual", Platform::LinkedIn, &options());
        assert!(full.contains("#AI"));
    }

    #[test]
    fn test_newsletter_never_gets_hashtags() {
        let body = platform_content("AI", "casual", Platform::Newsletter, &options());
        assert!(!body.contains("#AI"));
    }

    #[test]
    fn test_mock_outreach_caps_at_five() {
        let leads = mock_leads("fintech", &[Platform::LinkedIn], 10);
        let messages = mock_outreach("fintech", "professional", &leads, "collaboration");
        assert_eq!(messages.len(), 5);
        for (message, lead) in messages.iter().zip(&leads) {
            assert_eq!(message.lead_id, lead.id);
            assert!(message.message_body.contains(&lead.name));
            assert!(message.estimated_response_rate >= 0.15);
            assert!(message.personalization_score <= 0.95);
        }
    }

    #[test]
    fn test_subject_lines_vary_by_type() {
        let leads = mock_leads("AI", &[Platform::LinkedIn], 1);
        let collab = mock_outreach("AI", "casual", &leads, "collaboration");
        let interview = mock_outreach("AI", "casual", &leads, "interview");
        assert!(collab[0].subject_line.contains("Collaboration"));
        assert!(interview[0].subject_line.contains("Interview"));
    }

    #[test]
    fn test_hashtags_keyword_table() {
        let tags = hashtags("AI tools");
        assert!(tags.contains("#AI"));
        assert!(tags.contains("#MachineLearning"));
        assert!(tags.contains("#AITools"));
        assert!(tags.split(' ').count() <= 8);
    }

    #[test]
    fn test_hashtags_cap_at_eight() {
        // Two keyword matches produce ten table tags; the list is capped.
        let tags = hashtags("AI marketing");
        assert_eq!(tags.split(' ').count(), 8);
    }

    #[test]
    fn test_research_brief_structure() {
        let data = research_brief("AI tools", &[Platform::Blog]);
        assert!(data.research_brief.contains("# Research Brief: AI tools"));
        assert!(data.research_brief.contains("Blog"));
        assert!(data.sources.is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ai tools"), "Ai Tools");
        assert_eq!(title_case("fintech"), "Fintech");
    }
}
