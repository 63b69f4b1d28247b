//! Site content
//!
//! Opaque display data. The motion runtime only cares how many animated
//! elements each list produces.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub image: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub rating: u8,
    pub date: &'static str,
    pub avatar: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub tech: &'static [&'static str],
    pub description: &'static str,
    pub image: &'static str,
    pub stats: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const SERVICES: [Service; 8] = [
    Service {
        title: "Web Development",
        description: "High-end websites and powerful web applications built for extreme scale.",
        icon: "globe",
        image: "/illustrations/systems_architecture_illustration_1769681075956.png",
    },
    Service {
        title: "Mobile Apps",
        description: "Modern iPhone and Android apps with smooth, premium experiences.",
        icon: "smartphone",
        image: "/illustrations/native_engineering_illustration_1769681095829.png",
    },
    Service {
        title: "AI Solutions",
        description: "Smart AI systems to automate your business and boost efficiency.",
        icon: "cpu",
        image: "/illustrations/ai_neural_logic_illustration_1769681144070.png",
    },
    Service {
        title: "Smart Chatbots",
        description: "Intelligent AI chatbots that engage your customers 24/7.",
        icon: "message-square",
        image: "/illustrations/ai_neural_logic_illustration_1769681144070.png",
    },
    Service {
        title: "Custom Software",
        description: "Bespoke software solutions tailored to your unique business needs.",
        icon: "code",
        image: "/illustrations/product_engineering_illustration_1769681168138.png",
    },
    Service {
        title: "UI/UX Design",
        description: "Beautiful, easy-to-use designs that make your product stand out.",
        icon: "layout",
        image: "/illustrations/product_engineering_illustration_1769681168138.png",
    },
    Service {
        title: "Cyber Security",
        description: "Keeping your data safe with world-class security protocols.",
        icon: "shield-check",
        image: "/illustrations/technical_audits_illustration_1769681193383.png",
    },
    Service {
        title: "Cloud & Data",
        description: "Fast, reliable cloud hosting and smart data management.",
        icon: "database",
        image: "/illustrations/cloud_infrastructure_illustration_1769681118135.png",
    },
];

pub const TESTIMONIALS: [Testimonial; 5] = [
    Testimonial {
        name: "Arjun Mehta",
        role: "CTO, CloudScale",
        content: "Outstanding AI integration. They didn't just build a tool; they redefined our entire backend logic, shaving weeks off our production timeline with stunning efficiency.",
        rating: 5,
        date: "Oct 24",
        avatar: "AM",
    },
    Testimonial {
        name: "Priya Sharma",
        role: "Head, TechMumbai",
        content: "The 'Liquid Glass' aesthetic is truly unparalleled. Our user engagement metrics spiked by 40% after the redesign. They create premium digital experiences that sell.",
        rating: 5,
        date: "Nov 12",
        avatar: "PS",
    },
    Testimonial {
        name: "Mark Thompson",
        role: "Founder, Apex",
        content: "Exceptional standards from start to finish. Their 'Binary Brilliance' philosophy is evident in the clean codebase and the rapid, highly professional delivery cycle.",
        rating: 5,
        date: "Dec 05",
        avatar: "MT",
    },
    Testimonial {
        name: "Alex Rivera",
        role: "CEO, Nexa",
        content: "Highly recommended for any serious venture. They solved our complex cloud scalability issues in record time while maintaining a sophisticated design language.",
        rating: 5,
        date: "Jan 10",
        avatar: "AR",
    },
    Testimonial {
        name: "Sophie Laurent",
        role: "Founder, Luxe",
        content: "A transformative partner for our brand. They didn't just meet our requirements; they elevated our entire identity through technical and aesthetic excellence.",
        rating: 5,
        date: "Jan 25",
        avatar: "SL",
    },
];

pub const PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        title: "Nova Fintech Hub",
        category: "Finance V3",
        tech: &["React", "Solidity", "AWS"],
        description: "A revolutionary decentralized finance dashboard providing real-time analytic depth and secure asset management across multiple chains.",
        image: "/illustrations/systems_architecture_illustration_1769681075956.png",
        stats: "0.4s Latency",
    },
    Project {
        id: 2,
        title: "NeuralSift AI",
        category: "AI Agents",
        tech: &["Next.js", "Python", "OpenAI"],
        description: "Advanced multi-agent neural platform designed to sift through millions of data points to provide actionable business intelligence.",
        image: "/illustrations/ai_neural_logic_illustration_1769681144070.png",
        stats: "99.8% Acc.",
    },
    Project {
        id: 3,
        title: "Luxe E-commerce",
        category: "XR Retail",
        tech: &["Vite", "Three.js", "Stripe"],
        description: "A premium virtual shopping experience utilizing WebGL for immersive product interactions and seamless high-speed checkouts.",
        image: "/illustrations/product_engineering_illustration_1769681168138.png",
        stats: "60 FPS Render",
    },
    Project {
        id: 4,
        title: "StreamLine CRM",
        category: "SaaS / Ops",
        tech: &["TypeScript", "GraphQL", "Docker"],
        description: "Enterprise-grade CRM with automated deployment cycles and real-time synchronization across global team nodes.",
        image: "/illustrations/technical_audits_illustration_1769681193383.png",
        stats: "Zero-Downtime",
    },
    Project {
        id: 5,
        title: "Apex Analytics",
        category: "Big Data",
        tech: &["D3.js", "Go", "GCP"],
        description: "High-performance data visualization engine built for extreme scale, providing sub-second latency on billions of events.",
        image: "/illustrations/cloud_infrastructure_illustration_1769681118135.png",
        stats: "12M Tx/Sec",
    },
    Project {
        id: 6,
        title: "Pulse Health",
        category: "Bio-Telemetry",
        tech: &["React Native", "Firebase"],
        description: "Next-generation health monitoring suite with encrypted biometrics and real-time emergency dispatch integration.",
        image: "/illustrations/native_engineering_illustration_1769681095829.png",
        stats: "M2M Sync",
    },
];

pub const ABOUT_STATS: [Stat; 4] = [
    Stat {
        value: "50+",
        label: "Global Launches",
    },
    Stat {
        value: "AI-First",
        label: "Architecture",
    },
    Stat {
        value: "24/7",
        label: "Mission Support",
    },
    Stat {
        value: "Jammu",
        label: "Core Base",
    },
];

/// Navbar menu entries: label and href
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("Services", "/#services"),
    ("Portfolio", "/portfolio"),
    ("About", "/#about"),
    ("Contact", "/#contact"),
];
