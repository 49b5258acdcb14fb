// Résumé screening: extraction, cleaning, category lookup and the request
// pipeline that ties them to the loaded models in `classifier`.

pub mod categories;
pub mod clean;
pub mod extract;
pub mod handlers;
pub mod pipeline;
