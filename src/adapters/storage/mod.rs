pub mod csv_employee_store;
