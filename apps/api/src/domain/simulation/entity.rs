/// Every route the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Index,
    Health,
    Metrics,
    Data,
    Slow,
    Error,
}

impl Endpoint {
    /// Routes advertised by `GET /`, in display order.
    pub const ADVERTISED: [Endpoint; 5] = [
        Endpoint::Health,
        Endpoint::Metrics,
        Endpoint::Data,
        Endpoint::Slow,
        Endpoint::Error,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Index => "/",
            Endpoint::Health => "/health",
            Endpoint::Metrics => "/metrics",
            Endpoint::Data => "/api/data",
            Endpoint::Slow => "/api/slow",
            Endpoint::Error => "/api/error",
        }
    }

    pub fn advertised_paths() -> Vec<&'static str> {
        Self::ADVERTISED.iter().map(|e| e.path()).collect()
    }
}

/// Label values of `application_errors_total{type}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Random failure branch of `/api/data`.
    Internal,
    /// Unconditional failure of `/api/error`.
    Forced,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal",
            ErrorKind::Forced => "forced",
        }
    }
}
