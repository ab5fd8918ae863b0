
mod pointer_tests;
