//! Canned topical replies and the order in which they are tried.
//!
//! Rules are evaluated top to bottom and the first rule with a term contained
//! in the lowercased message wins. The table has two tiers: one rule per topic
//! keyed on its own name, then broader synonyms. A topic can therefore appear
//! twice; its first appearance is the one that usually fires.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedTopic {
    ViolationHelp,
    TrafficRules,
    EmergencyProcedures,
    Violations,
    Greeting,
    Help,
    Revenue,
    Statistics,
    Management,
    Fines,
}

impl CannedTopic {
    pub fn key(&self) -> &'static str {
        match self {
            CannedTopic::ViolationHelp => "help with violations",
            CannedTopic::TrafficRules => "traffic rules",
            CannedTopic::EmergencyProcedures => "emergency procedures",
            CannedTopic::Violations => "violation",
            CannedTopic::Greeting => "hello",
            CannedTopic::Help => "help",
            CannedTopic::Revenue => "revenue",
            CannedTopic::Statistics => "statistics",
            CannedTopic::Management => "management",
            CannedTopic::Fines => "fines",
        }
    }

    pub fn response(&self) -> &'static str {
        match self {
            CannedTopic::ViolationHelp => VIOLATION_HELP,
            CannedTopic::TrafficRules => TRAFFIC_RULES,
            CannedTopic::EmergencyProcedures => EMERGENCY_PROCEDURES,
            CannedTopic::Violations => VIOLATIONS,
            CannedTopic::Greeting => GREETING,
            CannedTopic::Help => HELP,
            CannedTopic::Revenue => REVENUE,
            CannedTopic::Statistics => STATISTICS,
            CannedTopic::Management => MANAGEMENT,
            CannedTopic::Fines => FINES,
        }
    }
}

impl fmt::Display for CannedTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub terms: &'static [&'static str],
    pub topic: CannedTopic,
}

impl TopicRule {
    pub fn matches(&self, normalized: &str) -> bool {
        self.terms.iter().any(|term| normalized.contains(term))
    }
}

pub static TOPIC_RULES: &[TopicRule] = &[
    TopicRule { terms: &["violations"], topic: CannedTopic::ViolationHelp },
    TopicRule { terms: &["traffic rules"], topic: CannedTopic::TrafficRules },
    TopicRule { terms: &["emergency procedures"], topic: CannedTopic::EmergencyProcedures },
    TopicRule { terms: &["violation"], topic: CannedTopic::Violations },
    TopicRule { terms: &["hello"], topic: CannedTopic::Greeting },
    TopicRule { terms: &["help"], topic: CannedTopic::Help },
    TopicRule { terms: &["revenue"], topic: CannedTopic::Revenue },
    TopicRule { terms: &["statistics"], topic: CannedTopic::Statistics },
    TopicRule { terms: &["management"], topic: CannedTopic::Management },
    TopicRule { terms: &["fines"], topic: CannedTopic::Fines },
    // synonyms
    TopicRule { terms: &["emergency"], topic: CannedTopic::EmergencyProcedures },
    TopicRule { terms: &["rules"], topic: CannedTopic::TrafficRules },
    TopicRule { terms: &["hi"], topic: CannedTopic::Greeting },
    TopicRule { terms: &["money", "collection"], topic: CannedTopic::Revenue },
    TopicRule { terms: &["data", "analytics"], topic: CannedTopic::Statistics },
    TopicRule { terms: &["system", "administration"], topic: CannedTopic::Management },
    TopicRule { terms: &["penalty", "payment"], topic: CannedTopic::Fines },
];

pub fn match_topic(normalized: &str) -> Option<CannedTopic> {
    TOPIC_RULES.iter()
        .find(|rule| rule.matches(normalized))
        .map(|rule| rule.topic)
}

const VIOLATION_HELP: &str =
    r#"I can help you with traffic violations! Here are common violations and their consequences:

🚨 **Common Traffic Violations:**
• Speeding: ₹1000-5000 fine, points on license
• Red Light Violation: ₹3000-5000 fine
• No Helmet: ₹1000 fine
• Drunk Driving: ₹10,000 fine + imprisonment
• Wrong Side Driving: ₹1000 fine
• No License: ₹5000 fine
• No Insurance: ₹2000 fine

💡 **Need specific fine amounts?** Ask me about any violation with the word "fine" or "penalty"!"#;

const TRAFFIC_RULES: &str =
    r#"Here are the essential traffic rules in India:

🚦 **Traffic Signal Rules:**
• Red Light: Stop completely
• Yellow Light: Stop if safe, don't rush
• Green Light: Proceed with caution

🛣️ **General Rules:**
• Drive on the left side of the road
• Wear seatbelts (driver and front passenger)
• Wear helmets (two-wheeler riders and pillion)
• Don't use mobile phones while driving
• Don't drink and drive
• Follow speed limits
• Give way to emergency vehicles

📱 **Documentation Required:**
• Driving License
• Registration Certificate (RC)
• Insurance Certificate
• Pollution Under Control Certificate (PUCC)

🚨 **Emergency Numbers:**
• Police: 100
• Ambulance: 108
• Fire: 101"#;

const EMERGENCY_PROCEDURES: &str =
    r#"🚨 **Emergency Procedures for Traffic Incidents:**

**Immediate Actions:**
1. **Stop your vehicle** safely
2. **Check for injuries** - call 108 for ambulance if needed
3. **Call police** (100) to report the incident
4. **Move vehicles** to safe location if possible
5. **Exchange information** with other parties

**Documentation Required:**
• Driver's license
• Vehicle registration
• Insurance details
• Contact information

**What to Report:**
• Date, time, and location
• Vehicle numbers involved
• Nature of damage/injuries
• Witness statements (if any)

**Emergency Contacts:**
• Police: 100
• Ambulance: 108
• Fire: 101
• Traffic Police: Local station number

**Insurance Claims:**
• Contact your insurance company within 24 hours
• Submit required documents
• Follow up on claim status

**Legal Requirements:**
• File FIR if required
• Attend court hearings if summoned
• Pay fines within stipulated time"#;

const VIOLATIONS: &str =
    r#"I can help you understand traffic violations! Here are the main categories:

🚗 **Moving Violations:**
• Speeding
• Red light violations
• Wrong side driving
• Reckless driving
• Drunk driving

🅿️ **Non-Moving Violations:**
• Illegal parking
• No helmet
• No seatbelt
• Expired documents

📋 **Document Violations:**
• Driving without license
• No insurance
• No RC book
• No PUCC certificate

💡 **Need specific information?** Ask me about any violation with details!"#;

const GREETING: &str =
    r#"Hello! I'm your AI traffic management assistant. How can I help you today?

I can assist you with:
• Traffic violation explanations and fines
• Traffic rules and regulations
• Emergency procedures
• Report generation
• General traffic queries

Just ask me anything related to traffic management!"#;

const HELP: &str =
    r#"I'm here to help with all your traffic management needs! Here's what I can do:

📋 **Services Available:**
• Traffic violation explanations
• Fine amount queries
• Traffic rules and regulations
• Emergency procedures
• Report generation
• General traffic guidance

💡 **How to use:**
• Ask about fines: "What's the fine for speeding?"
• Get traffic rules: "Tell me about traffic rules"
• Emergency help: "What are emergency procedures?"
• Generate reports: "Generate report"

Just type your question and I'll help you!"#;

const REVENUE: &str =
    r#"💰 **Traffic Revenue and Financial Management:**

**Sources of Traffic Revenue:**
• Traffic violation fines
• Parking fees
• Vehicle registration fees
• Driving license fees
• Pollution control certificates
• Road tax collection
• Toll collection

**Revenue Collection Methods:**
• Online payment portals
• Mobile payment apps
• Bank transfers
• Cash payments at traffic stations
• E-challan system

**Revenue Distribution:**
• State government (majority)
• Local municipal bodies
• Traffic police department
• Road maintenance funds
• Public safety initiatives

**Financial Management:**
• Digital tracking systems
• Transparent accounting
• Regular audits
• Public reporting
• Budget allocation for traffic infrastructure

**Recent Trends:**
• Increasing digital payments
• Higher fine amounts for serious violations
• Focus on automated enforcement
• Revenue sharing with local bodies"#;

const STATISTICS: &str =
    r#"📊 **Traffic Statistics and Analytics:**

**Key Traffic Metrics:**
• Total violations per month/year
• Revenue collection statistics
• Accident rates and trends
• Most common violations
• Peak traffic hours
• Geographic distribution of violations

**Data Collection:**
• Automated traffic cameras
• Manual enforcement data
• Public reports
• Insurance company data
• Hospital records (accidents)

**Analytics Dashboard:**
• Real-time violation tracking
• Revenue trends
• Traffic pattern analysis
• Enforcement effectiveness
• Public safety metrics

**Reporting:**
• Monthly/quarterly reports
• Annual statistics
• Comparative analysis
• Performance indicators
• Public disclosure requirements"#;

const MANAGEMENT: &str =
    r#"🏛️ **Traffic Management System:**

**Administrative Structure:**
• Traffic Police Department
• Regional Traffic Offices
• Local Traffic Stations
• Specialized Units (Accident, Enforcement)

**Key Functions:**
• Traffic regulation and control
• Violation enforcement
• Accident investigation
• Public safety campaigns
• Infrastructure coordination

**Technology Integration:**
• Smart traffic signals
• Automated enforcement cameras
• Digital challan system
• Mobile apps for public
• Real-time monitoring

**Public Services:**
• License and registration
• Fine payment assistance
• Traffic rule education
• Emergency response
• Public complaints handling

**Performance Metrics:**
• Response time to incidents
• Violation detection rate
• Public satisfaction scores
• Revenue collection efficiency
• Accident reduction rates"#;

const FINES: &str =
    r#"💸 **Traffic Fine System:**

**Fine Categories:**
• Minor violations: ₹500-2000
• Major violations: ₹2000-10000
• Serious violations: ₹10000+ with imprisonment

**Payment Methods:**
• Online portals
• Mobile apps (PayTM, PhonePe)
• Bank transfers
• Cash at traffic stations
• UPI payments

**Payment Deadlines:**
• Immediate payment: 50% discount
• Within 30 days: Full amount
• After 30 days: Additional penalties
• Non-payment: Legal action

**Fine Collection Process:**
• Digital challan generation
• SMS/email notifications
• Online payment tracking
• Receipt generation
• Dispute resolution system

**Recent Updates:**
• Increased fine amounts
• Mandatory digital payments
• Enhanced enforcement
• Public awareness campaigns"#;
