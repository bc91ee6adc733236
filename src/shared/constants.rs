/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// COLLECTION NAMES
// =============================================================================

pub const SERVICES_COLLECTION: &str = "services";
pub const SERVICE_CATEGORIES_COLLECTION: &str = "service_categories";
pub const TIPS_COLLECTION: &str = "cooking_tips";
pub const TIP_CATEGORIES_COLLECTION: &str = "tip_categories";
pub const GALLERY_COLLECTION: &str = "gallery";
pub const GALLERY_CATEGORIES_COLLECTION: &str = "gallery_categories";
pub const USERS_COLLECTION: &str = "users";
pub const MESSAGES_COLLECTION: &str = "messages";

// =============================================================================
// CONTACT MESSAGE CLASSIFICATION
// =============================================================================

/// Words in subject or body that make a message urgent
pub const URGENT_KEYWORDS: &[&str] = &["urgente", "inmediato", "hoy", "mañana", "emergencia"];

/// Words in subject or body that make a message high priority
pub const HIGH_PRIORITY_KEYWORDS: &[&str] =
    &["boda", "evento", "importante", "presupuesto", "contrato"];

/// Vocabulary used to tag incoming contact messages
pub const MESSAGE_TAG_VOCABULARY: &[&str] = &[
    "catering",
    "evento",
    "boda",
    "empresarial",
    "presupuesto",
    "contrato",
    "oficina",
    "almuerzo",
    "cena",
    "desayuno",
    "coffee break",
    "cocktail",
    "vegetariano",
    "vegano",
    "sin gluten",
    "orgánico",
    "tradicional",
];

/// Color used for records whose category is unknown
pub const DEFAULT_CATEGORY_COLOR: &str = "#D46528";

/// Business name shown on the public site
pub const SITE_NAME: &str = "Sabores Ancestrales";
