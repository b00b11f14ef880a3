use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListAccounts,
    CreateAccount,
    ListPolicies,
    CreatePolicy,
    ListVolumes,
    CreateOperation,
    GetOperation,
    AcceptScan,
    Dashboard,
}

static ROUTES: Lazy<HashMap<&'static str, Route>> = Lazy::new(|| {
    vec![
        ("GET /accounts", Route::ListAccounts),
        ("POST /accounts", Route::CreateAccount),
        ("GET /policies", Route::ListPolicies),
        ("POST /policies", Route::CreatePolicy),
        ("GET /volumes", Route::ListVolumes),
        ("POST /operations", Route::CreateOperation),
        ("GET /operations/{id}", Route::GetOperation),
        ("POST /scan", Route::AcceptScan),
        ("GET /dashboard", Route::Dashboard),
    ]
    .into_iter()
    .collect()
});

impl Route {
    pub fn resolve(route_key: &str) -> Option<Route> {
        ROUTES.get(route_key).copied()
    }
}
