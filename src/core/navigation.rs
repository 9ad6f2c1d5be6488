//! Roles, sub-pages and the capabilities each role grants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is using the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Landing page, no role chosen yet
    #[default]
    Home,
    Customer,
    StoreAdmin,
}

impl Role {
    pub fn slug(&self) -> &'static str {
        match self {
            Role::Home => "home",
            Role::Customer => "cliente",
            Role::StoreAdmin => "loja",
        }
    }

    /// Text of the mode pill in the top bar
    pub fn pill(&self) -> &'static str {
        match self {
            Role::Home => "",
            Role::Customer => "CLIENTE",
            Role::StoreAdmin => "LOJA",
        }
    }

    /// Sub-page opened when the role is first entered
    pub fn default_page(&self) -> Option<SubPage> {
        match self {
            Role::Home => None,
            Role::Customer => Some(SubPage::Catalog),
            Role::StoreAdmin => Some(SubPage::Products),
        }
    }

    /// Sub-pages listed in the navigation bar, in display order
    pub fn nav_pages(&self) -> Vec<SubPage> {
        let caps = Capabilities::for_role(*self);
        SubPage::ALL
            .into_iter()
            .filter(|page| page.owner() == *self && caps.allows(*page))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Role::Home),
            "cliente" | "customer" => Ok(Role::Customer),
            "loja" | "store" | "admin" | "store_admin" => Ok(Role::StoreAdmin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A screen inside one of the role layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPage {
    // Customer
    Catalog,
    Discounts,
    Cart,
    // Store
    Products,
    Stock,
    StoreDiscounts,
    Customers,
    Stats,
    Dashboard,
}

impl SubPage {
    pub const ALL: [SubPage; 9] = [
        SubPage::Catalog,
        SubPage::Discounts,
        SubPage::Cart,
        SubPage::Products,
        SubPage::Stock,
        SubPage::StoreDiscounts,
        SubPage::Customers,
        SubPage::Stats,
        SubPage::Dashboard,
    ];

    /// Navigation button label
    pub fn label(&self) -> &'static str {
        match self {
            SubPage::Catalog => "Loja",
            SubPage::Discounts | SubPage::StoreDiscounts => "Descontos",
            SubPage::Cart => "Carrinho",
            SubPage::Products => "Produtos",
            SubPage::Stock => "Estoque",
            SubPage::Customers => "Clientes",
            SubPage::Stats => "Estatísticas",
            SubPage::Dashboard => "Painel",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SubPage::Catalog => "loja",
            SubPage::Discounts | SubPage::StoreDiscounts => "descontos",
            SubPage::Cart => "carrinho",
            SubPage::Products => "produtos",
            SubPage::Stock => "estoque",
            SubPage::Customers => "clientes",
            SubPage::Stats => "estatisticas",
            SubPage::Dashboard => "admin",
        }
    }

    /// The role whose layout hosts this page
    pub fn owner(&self) -> Role {
        match self {
            SubPage::Catalog | SubPage::Discounts | SubPage::Cart => Role::Customer,
            _ => Role::StoreAdmin,
        }
    }

    /// Resolve a slug within a role's layout
    ///
    /// `descontos` exists on both sides, so the role disambiguates. Slugs of
    /// the other layout still resolve so the access check can deny them.
    pub fn parse_for(role: Role, slug: &str) -> Option<SubPage> {
        let slug = slug.trim().to_lowercase();
        let mut candidates = SubPage::ALL.into_iter().filter(|p| p.slug() == slug);
        let first = candidates.next()?;
        match candidates.next() {
            Some(second) if second.owner() == role => Some(second),
            _ => Some(first),
        }
    }
}

impl fmt::Display for SubPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a role may see and do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub can_shop: bool,
    pub can_manage_products: bool,
    pub can_manage_discounts: bool,
    pub can_view_customers: bool,
    pub can_view_stats: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Home => Self::default(),
            Role::Customer => Self {
                can_shop: true,
                ..Self::default()
            },
            Role::StoreAdmin => Self {
                can_shop: false,
                can_manage_products: true,
                can_manage_discounts: true,
                can_view_customers: true,
                can_view_stats: true,
            },
        }
    }

    /// Whether the page may be rendered under these capabilities
    pub fn allows(&self, page: SubPage) -> bool {
        match page {
            SubPage::Catalog | SubPage::Discounts | SubPage::Cart => self.can_shop,
            SubPage::Products | SubPage::Stock => self.can_manage_products,
            SubPage::StoreDiscounts => self.can_manage_discounts,
            SubPage::Customers => self.can_view_customers,
            SubPage::Stats | SubPage::Dashboard => self.can_view_stats,
        }
    }
}
