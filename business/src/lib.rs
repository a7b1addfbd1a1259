pub mod application {
    pub mod recommendation {
        pub mod llm_call;
        pub mod recommend;
    }
    pub mod restaurant {
        pub mod list_cities;
        pub mod reload;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod restaurant {
        pub mod catalog;
        pub mod errors;
        pub mod filter;
        pub mod model;
        pub mod repository;
        pub mod store;
        pub mod use_cases {
            pub mod list_cities;
            pub mod reload;
        }
    }
    pub mod recommendation {
        pub mod cache;
        pub mod context;
        pub mod errors;
        pub mod fallback;
        pub mod model;
        pub mod parser;
        pub mod prompt;
        pub mod services;
        pub mod statistics;
        pub mod use_cases {
            pub mod recommend;
        }
    }
}
