// Scalar reads and status handling
mod suite_1;

// Records, arrays and the square calculation
mod suite_2;
