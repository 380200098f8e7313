pub mod config;

pub mod domain {
    pub mod simulation {
        pub mod entity;
        pub mod errors;
        pub mod simulator;
        pub mod traffic_mix;
        pub mod value_objects;
    }
}

pub mod infrastructure {
    pub mod monitoring;
}

pub mod presentation {
    pub mod http {
        pub mod errors;
        pub mod routes;
        pub mod state;

        pub mod handlers {
            pub mod health;
            pub mod index;
            pub mod metrics;
            pub mod simulation;
        }

        pub mod middleware {
            pub mod instrumentation;
            pub mod request_id;
        }
    }
}

pub mod workers {
    pub mod traffic_generator;
}
