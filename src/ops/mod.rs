pub mod cleaner_ops;
