//! Marketing copy for the landing page.

pub const HERO_TITLE: &str = "Find Your Path to the Perfect PM Role";
pub const HERO_SUBTITLE: &str = "HiredPath helps busy professionals navigate the job market with AI-driven role matching, keyword insights, and supportive community.";
pub const HERO_CTA: &str = "Join the Waitlist";
/// In-page anchor of the waitlist section.
pub const WAITLIST_ANCHOR: &str = "waitlist";

pub const PROBLEM_HEADING: &str = "Job searching shouldn\u{2019}t feel like a second job";
pub const CTA_HEADING: &str = "Ready to transform your job search?";
pub const CTA_LINK: &str = "Join the Waitlist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    /// Word shown before the figure, e.g. "Only".
    pub prefix: Option<&'static str>,
    /// Final figure as displayed, suffix included.
    pub value: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const STATS: [Stat; 5] = [
    Stat {
        prefix: None,
        value: "94.7%",
        text: "find the process inefficient and overwhelming.",
    },
    Stat {
        prefix: Some("Only"),
        value: "26.5%",
        text: "receive replies to applications.",
    },
    Stat {
        prefix: None,
        value: "73.7%",
        text: "lose track of applications and follow-ups.",
    },
    Stat {
        prefix: None,
        value: "90.8%",
        text: "want better keyword insights to tailor their resumes.",
    },
    Stat {
        prefix: None,
        value: "78.3%",
        text: "have networks they rarely utilize.",
    },
];

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "AI Job Matching",
        description: "Discover high-signal product management roles tailored to your background and aspirations using our AI-driven matching engine.",
    },
    Feature {
        title: "Keyword Intelligence",
        description: "Get personalized resume and pitch insights based on job description keywords to improve your search ranking and relevance.",
    },
    Feature {
        title: "Rapid Applications",
        description: "Automate job applications with targeted scripts and pre-filled forms, so you can apply to more roles in less time.",
    },
    Feature {
        title: "Smart Tracking & Insights",
        description: "Organize applications, schedule follow-ups, and gain data-driven insights into company signals and interview prep.",
    },
    Feature {
        title: "Emotional & Community Support",
        description: "Stay motivated through built-in journaling and a supportive community of job seekers and mentors.",
    },
    Feature {
        title: "Network Activation Tools",
        description: "Leverage your professional network with personalized outreach templates and warm introduction suggestions.",
    },
];

pub fn footer_text(year: i32) -> String {
    format!("\u{a9} {year} HiredPath. All rights reserved.")
}
