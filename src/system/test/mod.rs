mod capability_probe_test;
