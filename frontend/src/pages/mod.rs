pub mod admin_leaves;
