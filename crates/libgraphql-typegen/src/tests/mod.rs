mod backing_type_resolver_tests;
