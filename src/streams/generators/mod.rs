mod preferential_attachment;

pub use preferential_attachment::PreferentialAttachmentGenerator;
