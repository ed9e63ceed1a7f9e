mod cluster_normalizer_test;
