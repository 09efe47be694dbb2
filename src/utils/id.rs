use uuid::Uuid;

/// 生成实体 ID（随机 128 位，避免并发创建时冲突）
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
