//! # CyberAdvisor Knowledge Base
//!
//! File: cli/src/advisor/knowledge_base.rs
//!
//! ## Overview
//!
//! The fixed set of cybersecurity topics the advisor knows about, plus the
//! canned response pools (greetings, farewells, fallbacks) used by the
//! resolver.
//!
//! ## Matching
//!
//! Matching is a flat substring scan over topics in declaration order. The
//! first topic with any keyword contained in the input wins; there is no
//! ranking by specificity or match length. Declaration order is therefore part
//! of the observable behaviour: "my email password was stolen" resolves to
//! Password Safety because that topic is declared before Phishing Prevention
//! and Data Breach Response.
//!
use crate::core::error::AdvisorError;
use rand::seq::SliceRandom;
use rand::Rng;

/// A named cybersecurity subject with trigger keywords, response text and tips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Identifier, compared case-insensitively.
    pub key: String,
    pub display_name: String,
    /// Lowercase trigger substrings.
    pub keywords: Vec<String>,
    /// Response variants. Index 0 is the primary response.
    pub responses: Vec<String>,
    pub tips: Vec<String>,
}

impl Topic {
    /// # Create Topic (`Topic::new`)
    ///
    /// Builds a topic, lowercasing its key and keywords.
    ///
    /// ## Errors
    ///
    /// Returns `AdvisorError::Config` if `keywords` or `responses` is empty.
    pub fn new(
        key: &str,
        display_name: &str,
        keywords: &[&str],
        responses: &[&str],
        tips: &[&str],
    ) -> Result<Self, AdvisorError> {
        if keywords.is_empty() {
            return Err(AdvisorError::Config(format!(
                "Topic '{key}' must have at least one keyword."
            )));
        }
        if responses.is_empty() {
            return Err(AdvisorError::Config(format!(
                "Topic '{key}' must have at least one response."
            )));
        }
        Ok(Self {
            key: key.to_lowercase(),
            display_name: display_name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
        })
    }

    pub fn primary_response(&self) -> &str {
        self.responses.first().map(String::as_str).unwrap_or_default()
    }

    /// True if any keyword occurs in `normalized_input`.
    pub fn matches(&self, normalized_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_input.contains(keyword.as_str()))
    }
}

/// Ordered, immutable collection of topics.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
}

impl KnowledgeBase {
    /// Builds a knowledge base from topics in the given order.
    ///
    /// Fails if two topics share a key (case-insensitively).
    pub fn new(topics: Vec<Topic>) -> Result<Self, AdvisorError> {
        for (i, topic) in topics.iter().enumerate() {
            if topics[..i].iter().any(|t| t.key == topic.key) {
                return Err(AdvisorError::Config(format!(
                    "Duplicate topic key '{}'.",
                    topic.key
                )));
            }
        }
        Ok(Self { topics })
    }

    /// # Built-in Knowledge Base (`KnowledgeBase::builtin`)
    ///
    /// The nine topics shipped with the advisor, in their fixed match order:
    /// password, phishing, browsing, malware, data breach, vpn, social media,
    /// privacy, public wifi.
    pub fn builtin() -> Self {
        Self {
            topics: BUILTIN_TOPICS.iter().map(TopicSeed::to_topic).collect(),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic_keys(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Case-insensitive lookup by topic key.
    pub fn lookup(&self, key: &str) -> Result<&Topic, AdvisorError> {
        let wanted = key.trim().to_lowercase();
        self.topics
            .iter()
            .find(|t| t.key == wanted)
            .ok_or_else(|| AdvisorError::TopicNotFound {
                key: key.to_string(),
            })
    }

    /// First topic (declaration order) with a keyword contained in the input.
    pub fn find_by_keyword(&self, normalized_input: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.matches(normalized_input))
    }

    /// Like [`find_by_keyword`](Self::find_by_keyword), but the topic key itself
    /// also counts as a trigger.
    pub fn find_by_key_or_keyword(&self, normalized_input: &str) -> Option<&Topic> {
        self.topics
            .iter()
            .find(|t| normalized_input.contains(t.key.as_str()) || t.matches(normalized_input))
    }

    /// Uniform pick among the topic's response variants.
    pub fn pick_response_variant<'t, R: Rng + ?Sized>(
        &self,
        topic: &'t Topic,
        rng: &mut R,
    ) -> &'t str {
        topic
            .responses
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_else(|| topic.primary_response())
    }

    /// Variant text followed by every tip, bullet-prefixed, in list order.
    pub fn format_full_response(&self, topic: &Topic, variant: &str) -> String {
        let mut response = format!("{variant}\n\nAdditional tips:");
        for tip in &topic.tips {
            response.push_str("\n• ");
            response.push_str(tip);
        }
        response
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Uniform pick from one of the canned pools below.
pub fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub const GREETINGS: &[&str] = &[
    "Hello! How can I help you with cybersecurity today?",
    "Hi there! Ready to learn about staying safe online?",
    "Greetings! What cybersecurity topic are you interested in?",
    "Welcome! I'm here to answer your cybersecurity questions.",
];

pub const FAREWELLS: &[&str] = &[
    "Stay safe online! Remember what we discussed about cybersecurity.",
    "Thank you for chatting about cybersecurity! Keep those digital defenses strong!",
    "It was great helping you with cybersecurity information. Remember to stay vigilant online!",
    "Until next time, keep your passwords strong and your personal information secure!",
];

pub const UNKNOWN_RESPONSES: &[&str] = &[
    "I'm not sure I understand. Could you try rephrasing that?",
    "That topic isn't in my cybersecurity knowledge base. Can I help you with password safety, phishing, or safe browsing instead?",
    "I don't have information on that specific topic. Would you like to know about malware protection or data breach response?",
    "I'm not familiar with that question. Try asking about VPNs, social media security, or other cybersecurity topics.",
];

pub const HOW_ARE_YOU_REPLY: &str =
    "I'm functioning perfectly, thank you for asking! Ready to help you stay safe online.";

pub const PURPOSE_REPLY: &str = "My purpose is to help raise awareness about cybersecurity practices and answer your questions about staying safe online.";

pub const CAPABILITIES_REPLY: &str = "You can ask me about password safety, phishing, safe browsing, malware protection, data breaches, VPNs, social media security, online privacy and public Wi-Fi. Type 'help' to see every topic.";

struct TopicSeed {
    key: &'static str,
    display_name: &'static str,
    keywords: &'static [&'static str],
    responses: &'static [&'static str],
    tips: &'static [&'static str],
}

impl TopicSeed {
    fn to_topic(&self) -> Topic {
        Topic {
            key: self.key.to_string(),
            display_name: self.display_name.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            responses: self.responses.iter().map(|r| r.to_string()).collect(),
            tips: self.tips.iter().map(|t| t.to_string()).collect(),
        }
    }
}

const BUILTIN_TOPICS: &[TopicSeed] = &[
    TopicSeed {
        key: "password",
        display_name: "Password Safety",
        keywords: &["password", "passwords", "pwd", "pass", "passphrase"],
        responses: &[
            "For strong passwords: use at least 12 characters, mix uppercase, lowercase, numbers, and symbols. Never reuse passwords across accounts, and consider using a password manager.",
            "Use a unique password for each important account to prevent credential stuffing attacks.",
            "Consider using a password manager to generate and store complex passwords securely.",
            "The length of a password matters more than its complexity - aim for at least 12 characters.",
            "Passphrases (a string of random words) are often more secure and easier to remember than complex passwords.",
            "Enable two-factor authentication whenever possible for an additional layer of security.",
        ],
        tips: &[
            "Consider using a passphrase instead of a single word. For example, 'Purple-Horse-Battery-Staple-42!' is much stronger than 'P@ssw0rd'.",
            "Enable two-factor authentication (2FA) whenever possible for an additional layer of security.",
            "Change your passwords regularly, especially for high-value accounts like banking and email.",
            "Use a trusted password manager to generate and store complex passwords securely.",
        ],
    },
    TopicSeed {
        key: "phishing",
        display_name: "Phishing Prevention",
        keywords: &["phishing", "scam", "scams", "email", "fake", "fraud", "suspicious"],
        responses: &[
            "Phishing attempts trick you into revealing sensitive information. Always verify the sender's email address, don't click suspicious links, and never provide personal information unless you're certain of the recipient's identity.",
            "Always verify the sender's email address before clicking any links or downloading attachments.",
            "Be suspicious of emails with urgent requests or threatening language - legitimate organizations don't pressure you this way.",
            "Hover over links before clicking to see the actual URL destination. If it looks suspicious, don't click!",
            "Banks and legitimate companies will never ask for sensitive information via email.",
            "When in doubt about an email, contact the supposed sender through official channels to verify its authenticity.",
        ],
        tips: &[
            "Hover over links before clicking to see the actual URL destination.",
            "Be wary of urgent requests or threats that create pressure to act quickly.",
            "Look for spelling and grammar errors, which are common in phishing attempts.",
            "If an offer seems too good to be true, it probably is.",
        ],
    },
    TopicSeed {
        key: "browsing",
        display_name: "Safe Browsing",
        keywords: &["browsing", "browser", "internet", "web", "website", "surf", "online"],
        responses: &[
            "For safe browsing: keep your browser updated, use HTTPS websites, be careful when downloading files, don't use public Wi-Fi for sensitive transactions, and consider using a VPN for additional protection.",
            "Look for HTTPS in the URL and a padlock icon to ensure the website is secure.",
            "Use private browsing mode when using public computers to prevent storing your session data.",
            "Clear your cookies and browsing history regularly to protect your privacy.",
            "Consider using a VPN when connecting to public Wi-Fi networks for encrypted communications.",
            "Be cautious about what information you share online - once it's out there, it's hard to remove.",
        ],
        tips: &[
            "Clear your cookies and browsing history regularly to protect your privacy.",
            "Use browser extensions like ad blockers and privacy tools to enhance security.",
            "Check for HTTPS and a padlock icon in the address bar before entering sensitive information.",
            "Consider using a privacy-focused browser for additional protection.",
        ],
    },
    TopicSeed {
        key: "malware",
        display_name: "Malware Protection",
        keywords: &["malware", "virus", "trojan", "ransomware", "spyware", "adware", "infection"],
        responses: &[
            "To protect against malware: keep your software updated, use reputable antivirus software, don't download from untrusted sources, and be cautious of email attachments.",
            "Keep your operating system and applications updated to patch security vulnerabilities.",
            "Only download software from official websites and app stores to reduce the risk of malware.",
            "Be cautious of email attachments, even from people you know - their accounts could be compromised.",
            "Use reputable antivirus software and keep it updated for the latest malware protection.",
            "Scan files before opening them, especially if they come from unfamiliar sources.",
        ],
        tips: &[
            "Regularly scan your system with anti-malware software.",
            "Be especially cautious of files with extensions like .exe, .bat, or .scr.",
            "Keep your operating system and applications updated with the latest security patches.",
            "Back up your important data regularly to protect against ransomware attacks.",
        ],
    },
    TopicSeed {
        key: "data breach",
        display_name: "Data Breach Response",
        keywords: &["data breach", "breach", "hack", "leaked", "stolen", "compromised", "identity theft"],
        responses: &[
            "If you're affected by a data breach: change your passwords immediately, monitor your accounts for suspicious activity, and consider freezing your credit if personal information was compromised.",
            "After a breach, start with the accounts that matter most: email first, since it can reset everything else, then banking and shopping sites.",
            "Breached companies usually notify affected customers. Treat those notices seriously, but reach the company through its official website rather than links in the message.",
        ],
        tips: &[
            "Use services like Have I Been Pwned to check if your data has been compromised.",
            "Consider using a credit monitoring service after a major breach.",
            "Be extra vigilant about phishing attempts following a data breach announcement.",
            "Report suspicious activity on your accounts immediately to the service provider.",
        ],
    },
    TopicSeed {
        key: "vpn",
        display_name: "VPN Usage",
        keywords: &["vpn", "virtual private network", "proxy", "encrypted connection"],
        responses: &[
            "A VPN (Virtual Private Network) encrypts your internet connection, helping protect your privacy and security, especially on public Wi-Fi networks. It can also mask your IP address and location.",
            "A VPN moves trust from your local network to the VPN provider, so pick a provider you would trust with all of your traffic.",
            "Turn on your VPN's kill switch if it has one. It blocks traffic when the VPN connection drops so nothing leaks unencrypted.",
        ],
        tips: &[
            "Free VPNs often collect and sell your data - consider paying for a reputable service.",
            "Even with a VPN, practice good security habits as they don't make you completely anonymous.",
            "Choose a VPN provider with a strict no-logs policy for better privacy.",
            "Use a VPN when connecting to public Wi-Fi networks to protect your data from eavesdroppers.",
        ],
    },
    TopicSeed {
        key: "social media",
        display_name: "Social Media Security",
        keywords: &["social media", "facebook", "twitter", "instagram", "tiktok", "linkedin", "snapchat"],
        responses: &[
            "Protect your social media accounts by using strong passwords, enabling two-factor authentication, reviewing privacy settings regularly, and being careful about what personal information you share publicly.",
            "Regularly review your privacy settings on all social media platforms.",
            "Be cautious about accepting friend or connection requests from people you don't know.",
            "Limit the personal information you share on social media profiles.",
            "Be aware that quizzes and games often collect your data for marketing purposes.",
            "Use strong, unique passwords for your social media accounts and enable two-factor authentication.",
        ],
        tips: &[
            "Regularly review and remove third-party app access to your social media accounts.",
            "Be wary of quizzes and games that request access to your profile - they may collect personal data.",
            "Think twice before sharing personal details like your full birth date, address, or phone number.",
            "Be cautious about accepting friend or connection requests from people you don't know.",
        ],
    },
    TopicSeed {
        key: "privacy",
        display_name: "Online Privacy",
        keywords: &["privacy", "tracking", "cookies", "data collection", "anonymous", "incognito"],
        responses: &[
            "Protecting your online privacy involves controlling what information you share, using privacy-focused tools and services, and understanding how companies collect and use your data.",
            "Incognito mode only stops your own device from keeping history. Websites, your employer and your internet provider can still see what you do.",
            "Most apps ask for more permissions than they need. Review location, microphone and contact access on your phone every few months.",
        ],
        tips: &[
            "Regularly review privacy settings on websites and apps you use.",
            "Consider using privacy-focused browsers and search engines.",
            "Read privacy policies before using new services, especially regarding data collection practices.",
            "Use cookie blockers and ad blockers to reduce tracking across websites.",
        ],
    },
    TopicSeed {
        key: "public wifi",
        display_name: "Public Wi-Fi Safety",
        keywords: &["public wifi", "hotspot", "free wifi", "wireless", "cafe wifi", "hotel wifi"],
        responses: &[
            "Public Wi-Fi networks are convenient but risky. Use a VPN, avoid accessing sensitive accounts, verify network names, and turn off file sharing and automatic connections for better security.",
            "Attackers sometimes set up hotspots with names like the cafe's real network. Ask staff for the exact network name before connecting.",
            "Forget public networks on your device once you are done so it doesn't silently rejoin a lookalike network later.",
        ],
        tips: &[
            "Always use HTTPS websites when on public Wi-Fi.",
            "Avoid online banking or shopping on public networks unless using a VPN.",
            "Disable automatic connections to prevent your device from joining unknown networks.",
            "Consider using your mobile data instead of public Wi-Fi for sensitive activities.",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_topics_keep_declaration_order() {
        let kb = KnowledgeBase::builtin();
        let keys: Vec<&str> = kb.topic_keys().collect();
        assert_eq!(
            keys,
            vec![
                "password",
                "phishing",
                "browsing",
                "malware",
                "data breach",
                "vpn",
                "social media",
                "privacy",
                "public wifi"
            ]
        );
        for topic in kb.topics() {
            assert!(!topic.keywords.is_empty() && !topic.responses.is_empty());
            assert_eq!(topic.key, topic.key.to_lowercase());
            assert!(topic.keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.lookup("VPN").unwrap().display_name, "VPN Usage");
        assert_eq!(
            kb.lookup("  Data Breach ").unwrap().display_name,
            "Data Breach Response"
        );
    }

    #[test]
    fn lookup_unknown_key_fails() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.lookup("firewalls").unwrap_err(),
            AdvisorError::TopicNotFound {
                key: "firewalls".into()
            }
        );
    }

    #[test]
    fn first_declared_topic_wins_on_overlap() {
        // "email" belongs to phishing and "stolen" to data breach, but
        // "password" is declared first.
        let kb = KnowledgeBase::builtin();
        let topic = kb
            .find_by_keyword("my email password was stolen")
            .expect("should match");
        assert_eq!(topic.key, "password");

        let topic = kb.find_by_keyword("is this email a scam?").unwrap();
        assert_eq!(topic.key, "phishing");
    }

    #[test]
    fn keyword_match_is_plain_substring() {
        let kb = KnowledgeBase::builtin();
        // "pass" is a keyword, so any word containing it matches.
        assert_eq!(kb.find_by_keyword("i lost my compass").unwrap().key, "password");
        assert!(kb.find_by_keyword("tell me about firewalls").is_none());
    }

    #[test]
    fn key_or_keyword_matches_multiword_keys() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(
            kb.find_by_key_or_keyword("i'm interested in public wifi").unwrap().key,
            "public wifi"
        );
    }

    #[test]
    fn format_full_response_lists_every_tip() {
        let kb = KnowledgeBase::builtin();
        let topic = kb.lookup("vpn").unwrap();
        let text = kb.format_full_response(topic, topic.primary_response());

        assert!(text.starts_with(topic.primary_response()));
        assert!(text.contains("\n\nAdditional tips:"));
        let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("• ")).collect();
        assert_eq!(bullets.len(), topic.tips.len());
        for (line, tip) in bullets.iter().zip(&topic.tips) {
            assert_eq!(*line, format!("• {tip}"));
        }
    }

    #[test]
    fn variant_pick_is_reproducible_for_a_seed() {
        let kb = KnowledgeBase::builtin();
        let topic = kb.lookup("password").unwrap();
        let a: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(11);
            (0..8).map(|_| kb.pick_response_variant(topic, &mut rng)).collect()
        };
        let b: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(11);
            (0..8).map(|_| kb.pick_response_variant(topic, &mut rng)).collect()
        };
        assert_eq!(a, b);
        assert!(a.iter().all(|v| topic.responses.iter().any(|r| r == v)));
    }

    #[test]
    fn topic_requires_keywords_and_responses() {
        assert!(Topic::new("x", "X", &[], &["r"], &[]).is_err());
        assert!(Topic::new("x", "X", &["k"], &[], &[]).is_err());
        let topic = Topic::new("Firewall", "Firewalls", &["FIREWALL"], &["r"], &[]).unwrap();
        assert_eq!(topic.key, "firewall");
        assert_eq!(topic.keywords, vec!["firewall"]);
    }

    #[test]
    fn duplicate_keys_rejected() {
        let a = Topic::new("vpn", "A", &["a"], &["r"], &[]).unwrap();
        let b = Topic::new("VPN", "B", &["b"], &["r"], &[]).unwrap();
        assert!(KnowledgeBase::new(vec![a, b]).is_err());
    }

    #[test]
    fn pick_returns_pool_member() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert!(FAREWELLS.contains(&pick(FAREWELLS, &mut rng)));
        }
        assert_eq!(pick(&[], &mut rng), "");
    }
}
