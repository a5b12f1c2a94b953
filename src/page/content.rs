//! Marketing copy for the landing page. Plain data, consumed once at
//! composition time.

pub struct Ticker {
    pub symbol: &'static str,
    pub price: &'static str,
    pub change: &'static str,
    pub positive: bool,
}

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub struct PricingPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub perks: &'static [&'static str],
    pub highlighted: bool,
}

pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub rating: u8,
}

impl Ticker {
    /// `BTC $64,234 ▲ +5.2%`
    pub fn label(&self) -> String {
        let arrow = if self.positive { '▲' } else { '▼' };
        format!("{} {} {} {}", self.symbol, self.price, arrow, self.change)
    }
}

impl Feature {
    pub fn label(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}

impl PricingPlan {
    pub fn label(&self) -> String {
        let badge = if self.highlighted { " (Most Popular)" } else { "" };
        format!(
            "{}{} {}{}: {}",
            self.name,
            badge,
            self.price,
            self.period,
            self.perks.join(", ")
        )
    }
}

impl Testimonial {
    pub fn label(&self) -> String {
        format!(
            "{} \"{}\" {}, {}",
            "★".repeat(self.rating as usize),
            self.quote,
            self.name,
            self.role
        )
    }
}

pub const BRAND: &str = "CryptoAI";

pub const TICKERS: &[Ticker] = &[
    Ticker {
        symbol: "BTC",
        price: "$64,234",
        change: "+5.2%",
        positive: true,
    },
    Ticker {
        symbol: "ETH",
        price: "$3,456",
        change: "+3.8%",
        positive: true,
    },
    Ticker {
        symbol: "SOL",
        price: "$142",
        change: "-1.2%",
        positive: false,
    },
    Ticker {
        symbol: "ADA",
        price: "$0.58",
        change: "+7.4%",
        positive: true,
    },
];

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "AI-Powered Predictions",
        description: "Advanced machine learning algorithms analyze market patterns to predict potential price movements with 87% accuracy.",
    },
    Feature {
        title: "Real-Time Trading Signals",
        description: "Get instant notifications for high-probability trading opportunities based on technical indicators and sentiment analysis.",
    },
    Feature {
        title: "Risk Assessment",
        description: "Comprehensive risk analysis tools help you make informed decisions and protect your investments from volatile market conditions.",
    },
    Feature {
        title: "Lightning-Fast Analysis",
        description: "Process thousands of data points in milliseconds to give you the edge in fast-moving cryptocurrency markets.",
    },
];

pub const PRICING: &[PricingPlan] = &[
    PricingPlan {
        name: "Starter",
        price: "$29",
        period: "/month",
        perks: &[
            "Basic AI insights",
            "Real-time market data",
            "10 trading signals/day",
            "Email support",
            "Mobile app access",
        ],
        highlighted: false,
    },
    PricingPlan {
        name: "Pro",
        price: "$79",
        period: "/month",
        perks: &[
            "Advanced AI predictions",
            "Unlimited trading signals",
            "Risk assessment tools",
            "Priority support",
            "Portfolio tracking",
            "API access",
        ],
        highlighted: true,
    },
    PricingPlan {
        name: "Enterprise",
        price: "$199",
        period: "/month",
        perks: &[
            "Everything in Pro",
            "Custom AI models",
            "Dedicated account manager",
            "White-label solutions",
            "Advanced analytics",
            "Team collaboration",
        ],
        highlighted: false,
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Sarah Chen",
        role: "Day Trader",
        quote: "CryptoAI has transformed my trading strategy. The AI predictions are incredibly accurate and have helped me increase my portfolio by 43% in just 3 months.",
        rating: 5,
    },
    Testimonial {
        name: "Marcus Johnson",
        role: "Crypto Investor",
        quote: "The risk assessment tools are a game-changer. I feel much more confident in my investment decisions knowing I have data-backed insights.",
        rating: 5,
    },
    Testimonial {
        name: "Elena Rodriguez",
        role: "Portfolio Manager",
        quote: "Best crypto analysis platform I've used. The real-time signals and comprehensive data visualization make it essential for professional trading.",
        rating: 5,
    },
];

/// In-page anchors shown in the navigation bar
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Features", "#features"),
    ("Pricing", "#pricing"),
    ("Testimonials", "#testimonials"),
];

/// Brand followed by the navigation link titles
pub fn nav_label() -> String {
    let links: Vec<&str> = NAV_LINKS.iter().map(|(title, _)| *title).collect();
    format!("{} | {}", BRAND, links.join(" "))
}
