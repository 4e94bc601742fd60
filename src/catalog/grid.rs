//! Grid-connection capacity table.

/// A standard three-phase grid connection with its capacity limit.
#[derive(Debug, Clone, Copy)]
pub struct GridConnection {
    /// Connection code, e.g. `"3x40A"`.
    pub id: &'static str,
    pub max_current_a: u32,
    /// Contracted capacity derived from the current rating (kW).
    pub max_power_kw: f64,
}

/// Standard utility-building connection sizes.
pub static GRID_CONNECTIONS: &[GridConnection] = &[
    GridConnection { id: "3x25A", max_current_a: 25, max_power_kw: 17.3 },
    GridConnection { id: "3x35A", max_current_a: 35, max_power_kw: 24.2 },
    GridConnection { id: "3x40A", max_current_a: 40, max_power_kw: 27.7 },
    GridConnection { id: "3x50A", max_current_a: 50, max_power_kw: 34.6 },
    GridConnection { id: "3x63A", max_current_a: 63, max_power_kw: 43.6 },
    GridConnection { id: "3x80A", max_current_a: 80, max_power_kw: 55.4 },
    GridConnection { id: "3x100A", max_current_a: 100, max_power_kw: 69.3 },
];

/// Looks up a grid connection by its code.
pub fn connection_by_id(id: &str) -> Option<&'static GridConnection> {
    GRID_CONNECTIONS.iter().find(|c| c.id == id)
}
