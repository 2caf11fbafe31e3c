// Database queries organized by tariff area
// Each module contains focused queries against the calculator_* tables

pub mod prices;
pub mod reference;

// Re-export commonly used query functions
pub use prices::{find_prices, group_modifiers_by_price, load_price_modifiers};
pub use reference::{
    get_advocate_type, get_fee_type_by_code, get_modifier_types, get_offence_class,
    get_scenario, get_scheme, get_schemes_valid_on, get_units,
};
