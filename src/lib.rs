pub mod configuration;

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod function {
        pub mod function;
        pub mod functions;

        pub mod basic {
            pub mod exp;
            pub mod log;
            pub mod trigonometric;
        }

        pub mod meta {
            pub mod sum;
            pub mod mult;
            pub mod power;
            pub mod composition;
            pub mod scale;
            pub mod shift;
        }

        pub mod tabulated {
            pub mod functionpoint;
            pub mod tabulatedfunctionerror;
            pub mod tabulatedfunction;
            pub mod arraytabulatedfunction;
            pub mod linkedlisttabulatedfunction;
            pub mod tabulatedfunctions;
            pub mod tabulatedfunctionmanager;

            #[cfg(test)]
            mod contracttests;
        }
    }
}
