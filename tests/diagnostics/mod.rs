mod tests_code_out_of_region;
mod tests_diagnostic_options;
