pub mod books;

use folio_kernel::ModuleRegistry;

/// Register all domain modules with the registry.
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(books::create_module());
}
