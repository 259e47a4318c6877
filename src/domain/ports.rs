use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    /// 讀取相對於儲存根目錄的檔案；不存在時回傳 `ErrorKind::NotFound` 的 IO 錯誤
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn site_theme(&self) -> &str;
    fn devotions_root(&self) -> &str;
    fn year_document_path(&self, year: i32) -> String;
    fn verses_path(&self) -> &str;
    fn studies_path(&self) -> &str;
}
