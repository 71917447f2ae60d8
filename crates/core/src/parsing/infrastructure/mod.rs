pub mod heuristic_clause_parser;
