//! Seed data: the shape of the fixture files and the built-in fallbacks
//! used when a fixture file is missing or cannot be parsed.

use serde::{Deserialize, Serialize};

use crate::features::categories::models::Category;
use crate::features::gallery::models::GalleryImage;
use crate::features::services::models::Service;
use crate::features::tips::models::{CookingTip, Difficulty};
use crate::features::users::models::{Role, User};

pub const SERVICES_FIXTURE: &str = "services.json";
pub const TIPS_FIXTURE: &str = "cooking-tips.json";
pub const GALLERY_FIXTURE: &str = "gallery.json";
pub const USERS_FIXTURE: &str = "users.json";

/// `services.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesFixture {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `cooking-tips.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsFixture {
    #[serde(default)]
    pub tips: Vec<CookingTip>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `gallery.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryFixture {
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `users.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersFixture {
    #[serde(default)]
    pub users: Vec<User>,
}

impl Default for ServicesFixture {
    fn default() -> Self {
        fn service(
            id: i64,
            title: &str,
            description: &str,
            icon: &str,
            category: &str,
            featured: bool,
        ) -> Service {
            Service {
                id,
                title: title.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                category: category.to_string(),
                badge: None,
                order: id as i32,
                active: true,
                featured,
                created_at: None,
                updated_at: None,
            }
        }

        Self {
            services: vec![
                service(
                    1,
                    "Catering Empresarial",
                    "Servicios de catering especializados para empresas y eventos corporativos",
                    "bi-cup-hot-fill",
                    "catering",
                    true,
                ),
                service(
                    2,
                    "Eventos Especiales",
                    "Catering para bodas, cumpleaños y celebraciones especiales",
                    "bi-calendar-event-fill",
                    "eventos",
                    true,
                ),
                service(
                    3,
                    "Menús Personalizados",
                    "Creación de menús adaptados a tus necesidades específicas",
                    "bi-clipboard-data-fill",
                    "menus",
                    false,
                ),
            ],
            categories: vec![
                Category::seed("catering", "Catering", "#D46528"),
                Category::seed("eventos", "Eventos", "#185A48"),
                Category::seed("menus", "Menús", "#8B4513"),
            ],
        }
    }
}

impl Default for TipsFixture {
    fn default() -> Self {
        fn tip(
            id: i64,
            title: &str,
            content: &str,
            category: &str,
            time: &str,
            tags: &[&str],
            featured: bool,
        ) -> CookingTip {
            CookingTip {
                id,
                title: title.to_string(),
                content: content.to_string(),
                category: category.to_string(),
                difficulty: Difficulty::Easy,
                time: time.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                active: true,
                featured,
                order: id as i32,
                created_at: None,
                updated_at: None,
            }
        }

        Self {
            tips: vec![
                tip(
                    1,
                    "Conservación de Hierbas",
                    "Para mantener las hierbas frescas por más tiempo, envuelve los tallos en una toalla de papel húmeda y guárdalas en el refrigerador.",
                    "conservacion",
                    "5 min",
                    &["hierbas", "refrigerador", "frescura"],
                    true,
                ),
                tip(
                    2,
                    "Cortar Cebolla Sin Llorar",
                    "Antes de cortar la cebolla, métela en el congelador por 10 minutos. Esto reduce la liberación de gases que causan el lagrimeo.",
                    "tecnicas",
                    "10 min",
                    &["cebolla", "corte", "truco"],
                    true,
                ),
                tip(
                    3,
                    "Huevos Perfectos",
                    "Para huevos duros perfectos, colócalos en agua fría, lleva a ebullición, luego apaga el fuego y deja reposar 12 minutos.",
                    "huevos",
                    "15 min",
                    &["huevos", "coccion", "perfecto"],
                    false,
                ),
            ],
            categories: vec![
                Category::seed("conservacion", "Conservación", "#D46528"),
                Category::seed("tecnicas", "Técnicas", "#185A48"),
                Category::seed("huevos", "Huevos", "#8B4513"),
                Category::seed("carnes", "Carnes", "#8B0000"),
                Category::seed("vegetales", "Vegetales", "#228B22"),
                Category::seed("postres", "Postres", "#FF69B4"),
                Category::seed("bebidas", "Bebidas", "#4169E1"),
            ],
        }
    }
}

impl Default for GalleryFixture {
    fn default() -> Self {
        #[allow(clippy::too_many_arguments)]
        fn image(
            id: i64,
            title: &str,
            description: &str,
            filename: &str,
            url: &str,
            category: &str,
            alt: &str,
            tags: &[&str],
            featured: bool,
        ) -> GalleryImage {
            GalleryImage {
                id,
                title: title.to_string(),
                description: description.to_string(),
                url: url.to_string(),
                alt: alt.to_string(),
                filename: filename.to_string(),
                category: category.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                active: true,
                featured,
                order: id as i32,
                created_at: None,
                updated_at: None,
            }
        }

        Self {
            images: vec![
                image(
                    1,
                    "Plato Principal",
                    "Nuestro plato estrella con ingredientes frescos",
                    "plato-principal.jpg",
                    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=800",
                    "platos",
                    "Plato principal con ingredientes frescos",
                    &["plato", "principal", "fresco"],
                    true,
                ),
                image(
                    2,
                    "Evento Corporativo",
                    "Catering para eventos empresariales",
                    "evento-corporativo.jpg",
                    "https://images.unsplash.com/photo-1511795409834-ef04bbd61622?w=800",
                    "eventos",
                    "Evento corporativo con catering",
                    &["evento", "corporativo", "catering"],
                    true,
                ),
                image(
                    3,
                    "Postre Artesanal",
                    "Postres caseros con toque especial",
                    "postre-artesanal.jpg",
                    "https://images.unsplash.com/photo-1565958011703-44f9829ba187?w=800",
                    "postres",
                    "Postre artesanal casero",
                    &["postre", "artesanal", "casero"],
                    false,
                ),
            ],
            categories: vec![
                Category::seed("platos", "Platos Principales", "#D46528"),
                Category::seed("eventos", "Eventos", "#185A48"),
                Category::seed("postres", "Postres", "#8B4513"),
                Category::seed("bebidas", "Bebidas", "#4169E1"),
                Category::seed("decoracion", "Decoración", "#FF69B4"),
                Category::seed("equipamiento", "Equipamiento", "#808080"),
            ],
        }
    }
}

impl Default for UsersFixture {
    /// A single administrator so a fresh install can log in
    fn default() -> Self {
        Self {
            users: vec![User {
                id: 1,
                username: "admin".to_string(),
                cedula: "1234567890".to_string(),
                full_name: "Administrador".to_string(),
                role: Role::Admin,
                active: true,
                last_login: None,
                created_at: None,
                updated_at: None,
            }],
        }
    }
}
